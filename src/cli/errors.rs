//! CLI-specific error types
//!
//! Every CLI error is fatal: it is reported once and the process exits 1.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::pager::PagerError;
use crate::sort::SortError;
use crate::store::StoreError;
use crate::token::TokenError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Bad argument value (sort, filter)
    InvalidArgument,
    /// Token could not be decoded
    InvalidToken,
    /// Page fetch failed
    PageFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SEEK_CLI_CONFIG_ERROR",
            Self::IoError => "SEEK_CLI_IO_ERROR",
            Self::InvalidArgument => "SEEK_CLI_INVALID_ARGUMENT",
            Self::InvalidToken => "SEEK_CLI_INVALID_TOKEN",
            Self::PageFailed => "SEEK_CLI_PAGE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(format!("{} ({})", e, e.code()))
    }
}

impl From<SortError> for CliError {
    fn from(e: SortError) -> Self {
        Self::invalid_argument(format!("{} ({})", e, e.code()))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::io_error(format!("{} ({})", e, e.code()))
    }
}

impl From<TokenError> for CliError {
    fn from(e: TokenError) -> Self {
        Self::new(CliErrorCode::InvalidToken, format!("{} ({})", e, e.code()))
    }
}

impl From<PagerError> for CliError {
    fn from(e: PagerError) -> Self {
        Self::new(CliErrorCode::PageFailed, format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
