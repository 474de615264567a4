//! Terminal plotting surface for interactive plots
//!
//! Draws the series as a scatter plot and turns terminal input into
//! controller events:
//! - ←/→ move the cursor (pointer move), or step the active slider
//! - Enter reads the nearest point (tap)
//! - Tab selects the next label group (double activate)
//! - `s` toggles slider mode
//! - focus changes, start, and quit enter or leave the plot

mod scatter;

pub use scatter::{hex_color, label_color, PlotPoint, ScatterPlot, Viewport};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::interactive::{Session, ToneOutput, TranscriptSpeaker};

/// Controller event derived from terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor or slider by this many steps
    Move(i32),
    Tap,
    NextGroup,
    ToggleSlider,
    Enter,
    Leave,
    Quit,
}

/// Map a terminal event to a controller action
pub fn action_for(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(Action::Quit),
            (KeyCode::Left, m) if m.contains(KeyModifiers::SHIFT) => Some(Action::Move(-5)),
            (KeyCode::Right, m) if m.contains(KeyModifiers::SHIFT) => Some(Action::Move(5)),
            (KeyCode::Left, _) => Some(Action::Move(-1)),
            (KeyCode::Right, _) => Some(Action::Move(1)),
            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => Some(Action::Tap),
            (KeyCode::Tab, _) => Some(Action::NextGroup),
            (KeyCode::Char('s'), _) => Some(Action::ToggleSlider),
            _ => None,
        },
        Event::FocusGained => Some(Action::Enter),
        Event::FocusLost => Some(Action::Leave),
        _ => None,
    }
}

/// Interactive plot bound to the terminal
pub struct Explorer<T: ToneOutput> {
    session: Session<T>,
    transcript: Arc<TranscriptSpeaker>,
    running: Arc<AtomicBool>,
    points: Vec<PlotPoint>,
    viewport: Viewport,
    cursor: f64,
    cursor_step: f64,
    slider_mode: bool,
    slider_steps: Vec<usize>,
}

impl<T: ToneOutput> Explorer<T> {
    pub fn new(session: Session<T>, transcript: Arc<TranscriptSpeaker>, running: Arc<AtomicBool>) -> Self {
        let series = session.controller.series();
        let scales = session.scales;

        let points: Vec<PlotPoint> = (0..series.len())
            .filter_map(|i| series.point(i))
            .map(|p| PlotPoint { x: p.x, y: scales.project(p.label, p.y), label: p.label })
            .collect();

        let (x, cursor_step) = match series.bounds(None) {
            Some(b) => {
                let columns = session.controller.options().width.saturating_sub(2).max(1);
                let step = if b.x_range() > 0.0 { b.x_range() / columns as f64 } else { 1.0 };
                ((b.min_x, b.max_x), step)
            }
            None => ((0.0, 1.0), 1.0),
        };

        let slider_steps = vec![0; session.sliders.len()];

        Self {
            viewport: Viewport { x, y: scales.primary },
            cursor: x.0,
            cursor_step,
            slider_mode: false,
            slider_steps,
            points,
            session,
            transcript,
            running,
        }
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn slider_mode(&self) -> bool {
        self.slider_mode
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Apply one action; returns `false` once the plot was left for good
    pub fn apply(&mut self, action: Action) -> bool {
        let controller = &mut self.session.controller;
        match action {
            Action::Move(delta) if self.slider_mode => {
                let group = controller.target();
                if let Some(slider) = self.session.sliders.get(group) {
                    let current = self.slider_steps[group] as i64;
                    let step = (current + delta as i64).clamp(0, slider.steps() as i64) as usize;
                    self.slider_steps[group] = step;
                    self.cursor = slider.position(step);
                    controller.on_slider_change(group, self.cursor);
                }
            }
            Action::Move(delta) => {
                let (lo, hi) = self.viewport.x;
                self.cursor = (self.cursor + delta as f64 * self.cursor_step).clamp(lo, hi);
                controller.on_hover(self.cursor);
            }
            Action::Tap => {
                controller.on_tap(self.cursor);
            }
            Action::NextGroup => {
                if controller.on_double_activate().is_some() && self.slider_mode {
                    let group = controller.target();
                    if let Some(slider) = self.session.sliders.get(group) {
                        self.cursor = slider.position(self.slider_steps[group]);
                    }
                }
            }
            Action::ToggleSlider => {
                self.slider_mode = !self.slider_mode;
                if self.slider_mode {
                    // Pick up the slider where the cursor left off
                    let group = controller.target();
                    if let Some(slider) = self.session.sliders.get(group) {
                        self.slider_steps[group] = slider.step_of(self.cursor);
                    }
                }
                debug!(slider_mode = self.slider_mode, "input mode changed");
            }
            Action::Enter => {
                controller.on_enter();
            }
            Action::Leave => {
                controller.on_leave();
            }
            Action::Quit => {
                controller.on_leave();
                self.running.store(false, Ordering::SeqCst);
                return false;
            }
        }
        true
    }

    /// Y-ranges shown in the plot title, naming the secondary range if any
    pub fn axis_caption(&self) -> String {
        let scales = &self.session.scales;
        let (lo, hi) = scales.primary;
        let mut caption = format!("y {} .. {}", lo, hi);
        if let (Some(name), Some((lo, hi))) = (scales.range_name(1), scales.secondary) {
            caption.push_str(&format!(" | label 1 on {} y {} .. {}", name, lo, hi));
        }
        caption
    }

    fn draw(&self, f: &mut Frame) {
        let options = self.session.controller.options();
        let area = f.area();
        let plot_area = Rect {
            width: options.width.min(area.width),
            ..area
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(options.height.min(area.height.saturating_sub(3))),
                Constraint::Length(3),
            ])
            .split(plot_area);

        let scatter = ScatterPlot::new(&self.points, self.viewport)
            .cursor(self.cursor)
            .highlight(self.session.controller.target())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} | {} ", options.title, self.axis_caption())),
            );
        f.render_widget(scatter, chunks[0]);

        self.draw_status(f, chunks[1]);
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let group = self.session.controller.target();
        let mode = if self.slider_mode { "SLIDER" } else { "POINTER" };
        let spoken = self.transcript.last().unwrap_or_default();

        let text = Line::from(vec![
            Span::styled(format!(" {} ", mode), Style::default().fg(Color::Yellow)),
            Span::styled(format!(" label {} ", group), Style::default().fg(label_color(group))),
            Span::raw(format!(" x={:.3}  |  ", self.cursor)),
            Span::raw(spoken),
        ]);

        let paragraph = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ←/→ move  Enter read  Tab label  s slider  q quit "),
        );

        f.render_widget(paragraph, area);
    }
}

/// Run the interactive plot until the user quits
pub fn run_explore<T: ToneOutput>(mut explorer: Explorer<T>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut explorer);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;

    result
}

fn event_loop<T: ToneOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    explorer: &mut Explorer<T>,
) -> Result<()> {
    explorer.apply(Action::Enter);

    while explorer.is_running() {
        terminal.draw(|f| explorer.draw(f))?;

        if event::poll(Duration::from_millis(50))? {
            if let Some(action) = action_for(&event::read()?) {
                if !explorer.apply(action) {
                    break;
                }
            }
        }
    }

    Ok(())
}
