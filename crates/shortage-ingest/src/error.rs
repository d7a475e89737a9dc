//! Error types for dataset normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while normalizing a raw dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input JSON file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON.
    #[error("failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document is missing the top-level `results` array.
    #[error("no `results` array in {path}")]
    MissingResults { path: PathBuf },

    /// Failed to write a CSV artifact.
    #[error("failed to write {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, IngestError>;
