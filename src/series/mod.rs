//! Data series, label groups, and point lookup
//!
//! A series is an ordered list of `(x, y)` points, each tagged with a label
//! group. Group-scoped computations (bounds, nearest point, sliders) only
//! look at the points of one group.

mod axes;
mod bounds;
mod labels;
mod nearest;
mod slider;

pub use axes::{AxisScales, SECONDARY_RANGE};
pub use bounds::Bounds;
pub use labels::{color, resolve_labels, validate_labels, PALETTE};
pub use nearest::{nearest, Nearest};
pub use slider::{sliders, Slider};

use serde::Deserialize;

use crate::error::{PlotError, Result};

/// A single point of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub label: usize,
}

/// Labelled `(x, y)` series
#[derive(Debug, Clone)]
pub struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
    labels: Vec<usize>,
    max_label: usize,
}

impl Series {
    /// Build a series from y values, optional x values, and optional labels.
    ///
    /// Without `x` the points are placed at `0, 1, 2, ...`.
    pub fn new(y: Vec<f64>, x: Option<Vec<f64>>, labels: Option<&[i64]>) -> Result<Self> {
        if y.is_empty() {
            return Err(PlotError::EmptySeries);
        }

        let x = match x {
            Some(x) => {
                if x.len() != y.len() {
                    return Err(PlotError::LengthMismatch {
                        what: "x",
                        expected: y.len(),
                        actual: x.len(),
                    });
                }
                x
            }
            None => (0..y.len()).map(|i| i as f64).collect(),
        };

        let (labels, max_label) = resolve_labels(labels, y.len())?;

        Ok(Self { x, y, labels, max_label })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn max_label(&self) -> usize {
        self.max_label
    }

    /// Number of label groups
    pub fn group_count(&self) -> usize {
        self.max_label + 1
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        Some(Point {
            index,
            x: *self.x.get(index)?,
            y: *self.y.get(index)?,
            label: self.labels[index],
        })
    }

    /// Points of one label group, in series order
    pub fn group(&self, label: usize) -> impl Iterator<Item = Point> + '_ {
        (0..self.len())
            .filter(move |&i| self.labels[i] == label)
            .filter_map(move |i| self.point(i))
    }

    /// Bounds of one group, or of the whole series when `group` is `None`
    pub fn bounds(&self, group: Option<usize>) -> Option<Bounds> {
        match group {
            Some(label) => Bounds::from_points(self.group(label).map(|p| (p.x, p.y))),
            None => Bounds::from_points(self.x.iter().copied().zip(self.y.iter().copied())),
        }
    }
}

/// Series as read from a JSON document: either a bare array of y values or
/// an object with `y` and optional `x` and `label` arrays
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeriesInput {
    Values(Vec<f64>),
    Fields {
        y: Vec<f64>,
        #[serde(default)]
        x: Option<Vec<f64>>,
        #[serde(default)]
        label: Option<Vec<i64>>,
    },
}

impl SeriesInput {
    /// `(y, x, label)`
    pub fn into_parts(self) -> (Vec<f64>, Option<Vec<f64>>, Option<Vec<i64>>) {
        match self {
            SeriesInput::Values(y) => (y, None, None),
            SeriesInput::Fields { y, x, label } => (y, x, label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_default_x() {
        let series = Series::new(vec![4.0, 5.0, 6.0], None, None).unwrap();
        assert_eq!(series.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(series.labels(), &[0, 0, 0]);
        assert_eq!(series.group_count(), 1);
    }

    #[test]
    fn test_series_rejects_bad_input() {
        assert_eq!(Series::new(vec![], None, None).unwrap_err(), PlotError::EmptySeries);
        assert!(matches!(
            Series::new(vec![1.0, 2.0], Some(vec![0.0]), None),
            Err(PlotError::LengthMismatch { what: "x", .. })
        ));
        assert!(matches!(
            Series::new(vec![1.0, 2.0], None, Some(&[0, 2])),
            Err(PlotError::LabelGap { .. })
        ));
    }

    #[test]
    fn test_group_bounds() {
        let series = Series::new(
            vec![4.0, 5.0, 9.0],
            Some(vec![0.0, 1.0, 2.0]),
            Some(&[0, 0, 1]),
        )
        .unwrap();

        let whole = series.bounds(None).unwrap();
        assert_eq!((whole.min_x, whole.max_x), (0.0, 2.0));

        let second = series.bounds(Some(1)).unwrap();
        assert_eq!((second.min_x, second.max_x, second.min_y), (2.0, 2.0, 9.0));

        let indices: Vec<usize> = series.group(0).map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_series_input_forms() {
        let bare: SeriesInput = serde_json::from_str("[1, 2.5, 3]").unwrap();
        assert_eq!(bare.into_parts(), (vec![1.0, 2.5, 3.0], None, None));

        let fields: SeriesInput =
            serde_json::from_str(r#"{"y": [1, 2], "x": [10, 20], "label": [0, 1]}"#).unwrap();
        let (y, x, label) = fields.into_parts();
        assert_eq!(y, vec![1.0, 2.0]);
        assert_eq!(x, Some(vec![10.0, 20.0]));
        assert_eq!(label, Some(vec![0, 1]));

        let only_y: SeriesInput = serde_json::from_str(r#"{"y": [4]}"#).unwrap();
        assert_eq!(only_y.into_parts(), (vec![4.0], None, None));
    }
}
