//! Tone parameters for a resolved point

use super::{LinearMapper, Mapper};
use crate::series::{Bounds, Point};

/// Frequency and stereo position of a triggered tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    /// Hz
    pub frequency: f64,
    /// -1.0 (left) to 1.0 (right)
    pub pan: f64,
}

/// Maps points inside a bounding box to tone parameters.
///
/// y drives pitch from `base_freq` up to `base_freq + freq_range`,
/// x drives pan from hard left to hard right.
pub struct ToneMapper {
    pitch: LinearMapper,
    pan: LinearMapper,
}

impl ToneMapper {
    pub fn new(bounds: &Bounds, base_freq: f64, freq_range: f64) -> Self {
        Self {
            pitch: LinearMapper::new(bounds.min_y, bounds.max_y, base_freq, base_freq + freq_range),
            pan: LinearMapper::new(bounds.min_x, bounds.max_x, -1.0, 1.0),
        }
    }

    pub fn map(&self, point: &Point) -> ToneParams {
        ToneParams {
            frequency: self.pitch.map(point.y),
            pan: self.pan.map(point.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_mapping() {
        let bounds = Bounds { min_x: 0.0, max_x: 2.0, min_y: 4.0, max_y: 6.0 };
        let mapper = ToneMapper::new(&bounds, 261.626, 261.626);

        let low = mapper.map(&Point { index: 0, x: 0.0, y: 4.0, label: 0 });
        assert_eq!(low, ToneParams { frequency: 261.626, pan: -1.0 });

        let mid = mapper.map(&Point { index: 1, x: 1.0, y: 5.0, label: 0 });
        assert!((mid.frequency - 392.439).abs() < 1e-9);
        assert_eq!(mid.pan, 0.0);

        let high = mapper.map(&Point { index: 2, x: 2.0, y: 6.0, label: 0 });
        assert_eq!(high.pan, 1.0);
    }

    #[test]
    fn test_flat_group_uses_midpoints() {
        let bounds = Bounds { min_x: 3.0, max_x: 3.0, min_y: 1.0, max_y: 1.0 };
        let params = ToneMapper::new(&bounds, 200.0, 200.0).map(&Point { index: 0, x: 3.0, y: 1.0, label: 0 });
        assert_eq!(params, ToneParams { frequency: 300.0, pan: 0.0 });
    }
}
