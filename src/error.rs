//! Validation errors raised before any audio work starts

use thiserror::Error;

/// Caller misuse detected while validating plot or render input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("label {label} at index {index} is negative")]
    NegativeLabel { index: usize, label: i64 },

    #[error("max label must be lower than {palette} (got {label})")]
    LabelOutOfPalette { label: i64, palette: usize },

    #[error("labels must cover 0..={max} without gaps, missing {missing}")]
    LabelGap { max: i64, missing: i64 },

    #[error("length of {what} ({actual}) must equal {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("series has no data points")]
    EmptySeries,

    #[error("the maximum number of lines is {max} (got {actual})")]
    TooManyChannels { max: usize, actual: usize },

    #[error("multiple axes require exactly 2 label groups (got {groups})")]
    MultiAxesGroups { groups: usize },

    #[error("unknown render mode '{0}', expected 'sequential' or 'overlay'")]
    UnknownMode(String),

    #[error("unknown language '{0}', expected 'en' or 'ja'")]
    UnknownLanguage(String),

    #[error("malformed lines: {0}")]
    MalformedLines(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_violation() {
        let err = PlotError::LabelOutOfPalette { label: 12, palette: 10 };
        assert_eq!(err.to_string(), "max label must be lower than 10 (got 12)");

        let err = PlotError::TooManyChannels { max: 5, actual: 6 };
        assert!(err.to_string().contains("maximum number of lines is 5"));
    }
}
