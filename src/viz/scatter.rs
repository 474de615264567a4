//! Scatter plot widget for ratatui

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Widget},
};

use crate::series::color;

/// Parse a `#rrggbb` palette entry
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    if digits.len() == 6 {
        Color::Rgb(channel(0), channel(2), channel(4))
    } else {
        Color::Reset
    }
}

/// Terminal colour of a label group
pub fn label_color(label: usize) -> Color {
    hex_color(color(label))
}

/// Maps data coordinates onto the cells of an area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Viewport {
    /// Column of `x`, `None` when outside the x-range
    pub fn column(&self, x: f64, area: Rect) -> Option<u16> {
        cell(x, self.x, area.width).map(|c| area.x + c)
    }

    /// Row of `y` (larger values higher up), `None` when outside the y-range
    pub fn row(&self, y: f64, area: Rect) -> Option<u16> {
        cell(y, self.y, area.height).map(|c| area.y + area.height - 1 - c)
    }
}

fn cell(value: f64, (lo, hi): (f64, f64), cells: u16) -> Option<u16> {
    if cells == 0 || !value.is_finite() || value < lo || value > hi {
        return None;
    }
    let span = hi - lo;
    if span == 0.0 {
        return Some(cells / 2);
    }
    let last = (cells - 1) as f64;
    Some(((value - lo) / span * last).round() as u16)
}

/// A labelled point already projected onto the drawing axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub label: usize,
}

/// A widget that draws labelled points and an optional cursor column
pub struct ScatterPlot<'a> {
    points: &'a [PlotPoint],
    viewport: Viewport,
    cursor: Option<f64>,
    highlight: Option<usize>,
    block: Option<Block<'a>>,
}

impl<'a> ScatterPlot<'a> {
    pub fn new(points: &'a [PlotPoint], viewport: Viewport) -> Self {
        Self {
            points,
            viewport,
            cursor: None,
            highlight: None,
            block: None,
        }
    }

    pub fn cursor(mut self, x: f64) -> Self {
        self.cursor = Some(x);
        self
    }

    /// Draw this label group bold
    pub fn highlight(mut self, label: usize) -> Self {
        self.highlight = Some(label);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_points(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if let Some(column) = self.cursor.and_then(|x| self.viewport.column(x, area)) {
            for y in area.y..area.y + area.height {
                buf.set_string(column, y, "│", Style::default().fg(Color::DarkGray));
            }
        }

        for point in self.points {
            let (Some(column), Some(row)) = (
                self.viewport.column(point.x, area),
                self.viewport.row(point.y, area),
            ) else {
                continue;
            };

            let symbol = if self.highlight == Some(point.label) { "●" } else { "•" };
            buf.set_string(column, row, symbol, Style::default().fg(label_color(point.label)));
        }
    }
}

impl Widget for ScatterPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        self.render_points(inner_area, buf);
    }
}
