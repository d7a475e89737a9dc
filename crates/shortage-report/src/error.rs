//! Error types for the reporting layer.

use thiserror::Error;

/// Errors that can occur while building views or running report queries.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Database error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
