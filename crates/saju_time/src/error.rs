//! Error types for birth-time normalization.

use thiserror::Error;

/// Errors from date parsing, timezone resolution or time adjustment.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Date string in none of the accepted layouts.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Hour of day outside `[0, 24)` or not finite.
    #[error("invalid hour: {0}")]
    InvalidHour(f64),
    /// Timezone name unknown to the tz database.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    /// Latitude, longitude or reference meridian not finite or out of range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(f64),
    /// Adjusted date-time falls outside the representable range.
    #[error("adjusted time out of range")]
    OutOfRange,
}
