//! Label grouping
//!
//! Labels partition a series into groups `0..=max`. Every group id in that
//! range must be used and the largest one must have a palette colour.

use std::collections::BTreeSet;

use crate::error::{PlotError, Result};

/// Category colours, one per label group
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Validate a label sequence and return the largest label.
pub fn validate_labels(labels: &[i64], palette_size: usize) -> Result<usize> {
    if labels.is_empty() {
        return Err(PlotError::EmptySeries);
    }

    if let Some((index, &label)) = labels.iter().enumerate().find(|(_, &l)| l < 0) {
        return Err(PlotError::NegativeLabel { index, label });
    }

    let unique: BTreeSet<i64> = labels.iter().copied().collect();
    // Non-empty and non-negative, so last() exists
    let max = *unique.iter().next_back().unwrap_or(&0);

    if max as usize >= palette_size {
        return Err(PlotError::LabelOutOfPalette {
            label: max,
            palette: palette_size,
        });
    }

    if let Some(missing) = (0..=max).find(|l| !unique.contains(l)) {
        return Err(PlotError::LabelGap { max, missing });
    }

    Ok(max as usize)
}

/// Resolve optional labels into group ids for `len` points.
///
/// Absent labels put every point into group 0.
pub fn resolve_labels(labels: Option<&[i64]>, len: usize) -> Result<(Vec<usize>, usize)> {
    match labels {
        None => Ok((vec![0; len], 0)),
        Some(labels) => {
            if labels.len() != len {
                return Err(PlotError::LengthMismatch {
                    what: "label",
                    expected: len,
                    actual: labels.len(),
                });
            }
            let max = validate_labels(labels, PALETTE.len())?;
            Ok((labels.iter().map(|&l| l as usize).collect(), max))
        }
    }
}

/// Colour for a label group
pub fn color(label: usize) -> &'static str {
    PALETTE[label % PALETTE.len()]
}
