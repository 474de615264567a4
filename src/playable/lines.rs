//! Multi-line data matrix
//!
//! Rows are time steps, columns are lines. A flat list is a single line.

use serde::Deserialize;

use crate::error::{PlotError, Result};

/// Input shapes accepted when deserializing [`Lines`]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinesInput {
    Flat(Vec<Option<f64>>),
    Matrix(Vec<Vec<Option<f64>>>),
}

fn or_nan(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// Column-major matrix of line values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "LinesInput")]
pub struct Lines {
    rows: usize,
    columns: Vec<Vec<f64>>,
}

impl TryFrom<LinesInput> for Lines {
    type Error = PlotError;

    fn try_from(input: LinesInput) -> Result<Self> {
        match input {
            LinesInput::Flat(values) => Lines::from_column(or_nan(values)),
            LinesInput::Matrix(rows) => Lines::from_rows(rows.into_iter().map(or_nan).collect()),
        }
    }
}

impl Lines {
    /// A single line
    pub fn from_column(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(PlotError::EmptySeries);
        }
        Ok(Self { rows: values.len(), columns: vec![values] })
    }

    /// Row-major matrix, one row per time step.
    ///
    /// There must be more rows than columns, which catches transposed input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).ok_or(PlotError::EmptySeries)?;
        if width == 0 {
            return Err(PlotError::EmptySeries);
        }

        if let Some(i) = rows.iter().position(|r| r.len() != width) {
            return Err(PlotError::MalformedLines(format!(
                "row {} has {} values, expected {}",
                i,
                rows[i].len(),
                width
            )));
        }

        if rows.len() <= width {
            return Err(PlotError::MalformedLines(format!(
                "lines must be time by lines, got {} rows for {} lines",
                rows.len(),
                width
            )));
        }

        let columns = (0..width)
            .map(|c| rows.iter().map(|r| r[c]).collect())
            .collect();

        Ok(Self { rows: rows.len(), columns })
    }

    /// Build from separate columns of equal length
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        let rows = columns.first().map(Vec::len).ok_or(PlotError::EmptySeries)?;
        if rows == 0 {
            return Err(PlotError::EmptySeries);
        }
        if let Some(c) = columns.iter().position(|c| c.len() != rows) {
            return Err(PlotError::MalformedLines(format!(
                "line {} has {} values, expected {}",
                c,
                columns[c].len(),
                rows
            )));
        }
        Ok(Self { rows, columns })
    }

    /// Number of time steps
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of lines
    pub fn channels(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, channel: usize) -> &[f64] {
        &self.columns[channel]
    }

    /// Smallest and largest value across every line, ignoring NaN
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.columns
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
