//! Token codec errors

use thiserror::Error;

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Reasons a token cannot be encoded or decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,

    #[error("token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("token is not valid base64url: {0}")]
    Encoding(String),

    #[error("token payload is malformed: {0}")]
    Malformed(String),

    #[error("unsupported token version {0}")]
    UnsupportedVersion(u8),

    #[error("failed to serialize token: {0}")]
    Serialize(String),
}

impl TokenError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Empty => "SEEK_TOKEN_EMPTY",
            TokenError::TooLong { .. } => "SEEK_TOKEN_TOO_LONG",
            TokenError::Encoding(_) => "SEEK_TOKEN_ENCODING",
            TokenError::Malformed(_) => "SEEK_TOKEN_MALFORMED",
            TokenError::UnsupportedVersion(_) => "SEEK_TOKEN_VERSION",
            TokenError::Serialize(_) => "SEEK_TOKEN_SERIALIZE",
        }
    }
}
