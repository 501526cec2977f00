//! Pager error types
//!
//! Malformed tokens never appear here: decoding fails open.

use thiserror::Error;

use crate::store::StoreError;
use crate::token::TokenError;

/// Result type for page fetches
pub type PagerResult<T> = Result<T, PagerError>;

/// Page fetch failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    /// Page size is zero or above the configured maximum
    #[error("page size {requested} out of range (1..={max})")]
    InvalidPageSize { requested: usize, max: usize },

    /// The next token could not be produced
    #[error("cannot encode next token: {0}")]
    Token(#[from] TokenError),

    /// The store query failed; passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PagerError {
    /// Returns the stable error code (store and token codes pass through)
    pub fn code(&self) -> &'static str {
        match self {
            PagerError::InvalidPageSize { .. } => "SEEK_INVALID_PAGE_SIZE",
            PagerError::Token(e) => e.code(),
            PagerError::Store(e) => e.code(),
        }
    }
}
