use core_types::CoreError;
use thiserror::Error;

/// Errors raised while validating caller-supplied parameters.
///
/// Business data never produces an error: malformed records are coerced or
/// excluded by the aggregators themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid date range boundary: {0}")]
    InvalidBoundary(#[from] CoreError),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvertedRange { start: String, end: String },
}
