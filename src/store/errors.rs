//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failures. The pager propagates these unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The caller's deadline passed before the query completed
    #[error("query deadline exceeded")]
    DeadlineExceeded,

    /// Store could not be reached or refused the query
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Reading a data file failed
    #[error("I/O error: {0}")]
    Io(String),

    /// A line in a data file is not a JSON object
    #[error("invalid document at line {line}: {reason}")]
    InvalidDocument { line: usize, reason: String },
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::DeadlineExceeded => "SEEK_STORE_DEADLINE",
            StoreError::Unavailable(_) => "SEEK_STORE_UNAVAILABLE",
            StoreError::Io(_) => "SEEK_STORE_IO",
            StoreError::InvalidDocument { .. } => "SEEK_STORE_INVALID_DOCUMENT",
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
