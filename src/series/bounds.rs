//! Data bounds

/// Axis-aligned extent of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Compute bounds over `(x, y)` pairs, skipping NaN coordinates.
    ///
    /// Returns `None` when no pair contributes a value on both axes.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;

        for (x, y) in points {
            if x.is_nan() || y.is_nan() {
                continue;
            }
            bounds = Some(match bounds {
                None => Bounds { min_x: x, max_x: x, min_y: y, max_y: y },
                Some(b) => Bounds {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            });
        }

        bounds
    }

    /// Whether `x` lies inside `[min_x, max_x]`
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    pub fn x_range(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn y_range(&self) -> f64 {
        self.max_y - self.min_y
    }
}
