//! Y-axis scales for single and multi-axis plots
//!
//! In multi-axis mode the two label groups keep their own vertical range.
//! Group 1 is drawn against a named secondary range.

use super::Series;
use crate::error::{PlotError, Result};
use crate::mapping::{LinearMapper, Mapper};

/// Name of the y-range used by the second group in multi-axis mode
pub const SECONDARY_RANGE: &str = "secondary";

/// Vertical ranges for a plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScales {
    pub primary: (f64, f64),
    pub secondary: Option<(f64, f64)>,
}

impl AxisScales {
    /// Derive the y-ranges for `series`.
    ///
    /// Multi-axis mode requires exactly two label groups.
    pub fn new(series: &Series, multiple_axes: bool) -> Result<Self> {
        if !multiple_axes {
            let b = series.bounds(None).ok_or(PlotError::EmptySeries)?;
            return Ok(Self { primary: (b.min_y, b.max_y), secondary: None });
        }

        if series.group_count() != 2 {
            return Err(PlotError::MultiAxesGroups { groups: series.group_count() });
        }

        let first = series.bounds(Some(0)).ok_or(PlotError::EmptySeries)?;
        let second = series.bounds(Some(1)).ok_or(PlotError::EmptySeries)?;

        Ok(Self {
            primary: (first.min_y, first.max_y),
            secondary: Some((second.min_y, second.max_y)),
        })
    }

    /// Name of the y-range a group is drawn against, `None` for the primary one
    pub fn range_name(&self, group: usize) -> Option<&'static str> {
        match (self.secondary, group) {
            (Some(_), 1) => Some(SECONDARY_RANGE),
            _ => None,
        }
    }

    /// Project a group's y value onto the primary axis for drawing.
    pub fn project(&self, group: usize, y: f64) -> f64 {
        match (self.secondary, group) {
            (Some((lo, hi)), 1) => {
                LinearMapper::new(lo, hi, self.primary.0, self.primary.1)
                    .with_clamp(false)
                    .map(y)
            }
            _ => y,
        }
    }
}
