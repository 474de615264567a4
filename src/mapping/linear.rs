//! Linear mapper implementation

use super::Mapper;

/// Linear interpolation mapper
///
/// A zero-width input range maps every input to the midpoint of the output
/// range instead of dividing by zero.
#[derive(Debug, Clone)]
pub struct LinearMapper {
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    clamp: bool,
}

impl LinearMapper {
    /// Create a new linear mapper
    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Self {
        Self {
            in_min,
            in_max,
            out_min,
            out_max,
            clamp: true,
        }
    }

    /// Set whether to clamp output to range
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Whether the input range has zero width
    pub fn is_degenerate(&self) -> bool {
        self.in_max - self.in_min == 0.0
    }

    /// Position of `input` inside the input range, 0.0 at `in_min`, 1.0 at `in_max`
    pub fn normalize(&self, input: f64) -> f64 {
        if self.is_degenerate() {
            0.5
        } else {
            (input - self.in_min) / (self.in_max - self.in_min)
        }
    }
}

impl Mapper for LinearMapper {
    fn map(&self, input: f64) -> f64 {
        let normalized = self.normalize(input);

        // Upper bound must come out exact, a + (b - a) can round past it
        if normalized == 1.0 {
            return self.out_max;
        }

        let output = self.out_min + normalized * (self.out_max - self.out_min);

        if self.clamp {
            output.clamp(self.out_min.min(self.out_max), self.out_min.max(self.out_max))
        } else {
            output
        }
    }
}

/// Map a data value to a tone frequency by linear interpolation.
///
/// `min_value` maps to `min_freq` and `max_value` to `max_freq` exactly.
/// When `max_value == min_value` the midpoint frequency is returned.
pub fn map_frequency(value: f64, min_value: f64, max_value: f64, min_freq: f64, max_freq: f64) -> f64 {
    LinearMapper::new(min_value, max_value, min_freq, max_freq).map(value)
}

/// Stereo position of `x` inside `[min_x, max_x]`: -1.0 is hard left, 1.0 hard right.
pub fn pan_position(x: f64, min_x: f64, max_x: f64) -> f64 {
    LinearMapper::new(min_x, max_x, -1.0, 1.0).map(x)
}
