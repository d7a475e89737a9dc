//! Error types for the database load.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading artifacts into the database.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required CSV artifact is missing. Raised by the preflight check
    /// before any database contact.
    #[error("required file not found: {path}")]
    MissingCsv { path: PathBuf },

    /// Failed to read a CSV artifact.
    #[error("failed to read {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Database error; the surrounding transaction is rolled back.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
