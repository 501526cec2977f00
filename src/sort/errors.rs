//! Sort specification errors

use thiserror::Error;

/// Result type for sort spec construction
pub type SortResult<T> = Result<T, SortError>;

/// Errors raised while building a sort spec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// No criteria were added
    #[error("sort spec must contain at least one criterion")]
    Empty,

    /// The same field was added twice
    #[error("duplicate sort field: {0}")]
    DuplicateField(String),

    /// Field name is empty
    #[error("sort field name must not be empty")]
    EmptyField,

    /// Direction string could not be parsed
    #[error("invalid sort direction '{0}', expected 'asc' or 'desc'")]
    InvalidDirection(String),
}

impl SortError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SortError::Empty => "SEEK_SORT_EMPTY",
            SortError::DuplicateField(_) => "SEEK_SORT_DUPLICATE_FIELD",
            SortError::EmptyField => "SEEK_SORT_EMPTY_FIELD",
            SortError::InvalidDirection(_) => "SEEK_SORT_INVALID_DIRECTION",
        }
    }
}
