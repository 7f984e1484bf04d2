//! Error types for rule-table loading.

use thiserror::Error;

/// Errors raised while loading externally supplied rule tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// The table document is not valid JSON of the expected shape.
    #[error("table parse error: {0}")]
    TableParse(#[from] serde_json::Error),
    /// A row names a stem, branch, pillar or category that does not exist.
    #[error("unknown label in table: {0}")]
    UnknownLabel(String),
}
