//! Error types for Memento core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Memento operations.
pub type Result<T> = std::result::Result<T, MementoError>;

/// Core error type for Memento operations.
#[derive(Debug, Error)]
pub enum MementoError {
    /// Data validation error (malformed records, broken invariants)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid caller input (inverted range, missing birth date, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// A single image could not be fetched or decoded
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Archive assembly failed
    #[error("Packaging error: {0}")]
    Packaging(String),

    /// The export range selected no entries
    #[error("No entries between {start} and {end}")]
    EmptyExport { start: String, end: String },

    /// The export was cancelled between entries
    #[error("Export cancelled")]
    Cancelled,
}

impl From<std::io::Error> for MementoError {
    fn from(err: std::io::Error) -> Self {
        MementoError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for MementoError {
    fn from(err: serde_json::Error) -> Self {
        MementoError::Validation(err.to_string())
    }
}

impl From<reqwest::Error> for MementoError {
    fn from(err: reqwest::Error) -> Self {
        MementoError::Fetch(err.to_string())
    }
}
