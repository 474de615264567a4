//! Per-group sliders
//!
//! Each label group gets a slider spanning its own x-range, split into a
//! fixed number of partitions.

use super::Series;
use crate::error::{PlotError, Result};

/// Slider over the x-range of one label group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub group: usize,
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Slider {
    /// Number of steps between `start` and `end`
    pub fn steps(&self) -> usize {
        if self.step > 0.0 {
            ((self.end - self.start) / self.step).round() as usize
        } else {
            0
        }
    }

    /// Position of the given step, clamped to the slider end
    pub fn position(&self, step: usize) -> f64 {
        if step >= self.steps() {
            self.end
        } else {
            self.start + step as f64 * self.step
        }
    }

    /// Step closest to `value`
    pub fn step_of(&self, value: f64) -> usize {
        if self.step > 0.0 {
            (((value - self.start) / self.step).round().max(0.0) as usize).min(self.steps())
        } else {
            0
        }
    }
}

/// One slider per label group, each split into `partitions` steps.
pub fn sliders(series: &Series, partitions: usize) -> Result<Vec<Slider>> {
    if partitions == 0 {
        return Err(PlotError::InvalidParameter(
            "slider_partitions must be at least 1".to_string(),
        ));
    }

    (0..series.group_count())
        .map(|group| {
            let bounds = series.bounds(Some(group)).ok_or_else(|| {
                PlotError::InvalidParameter(format!("label group {} has no finite points", group))
            })?;
            Ok(Slider {
                group,
                start: bounds.min_x,
                end: bounds.max_x,
                step: bounds.x_range() / partitions as f64,
            })
        })
        .collect()
}
