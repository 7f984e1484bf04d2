//! Error types for chart calculation.

use saju_base::BaseError;
use saju_time::TimeError;
use thiserror::Error;

/// Errors raised by a lunar-calendar bridge.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// Date outside the range the bridge can convert.
    #[error("date {0} outside supported range")]
    OutOfRange(String),
    /// The bridge is not usable in this process.
    #[error("lunar bridge unavailable: {0}")]
    Unavailable(String),
    /// The bridge failed while converting.
    #[error("lunar conversion failed: {0}")]
    Conversion(String),
}

/// Errors from the calculation pipeline.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum SajuError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("table error: {0}")]
    Table(String),
    /// Derived value outside its cycle; unreachable for valid enums.
    #[error("invalid pillar: {0}")]
    InvalidPillar(String),
}

impl From<BaseError> for SajuError {
    fn from(e: BaseError) -> Self {
        Self::Table(e.to_string())
    }
}
