//! Pager configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!   "default_page_size": 20,
//!   "max_page_size": 1000,
//!   "max_token_len": 4096,
//!   "detect_last_page": true,
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::token::DEFAULT_MAX_TOKEN_LEN;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),

    #[error("invalid config JSON: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "SEEK_CONFIG_READ",
            ConfigError::Parse(_) => "SEEK_CONFIG_PARSE",
            ConfigError::Invalid(_) => "SEEK_CONFIG_INVALID",
        }
    }
}

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagerConfig {
    /// Page size used when a request does not set one (default: 20)
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest page size a request may ask for (default: 1000)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Longest accepted token, in characters (default: 4096)
    #[serde(default = "default_max_token_len")]
    pub max_token_len: usize,

    /// Fetch one extra row to tell whether another page exists (default: true).
    ///
    /// When false, any non-empty page carries a next token.
    #[serde(default = "default_detect_last_page")]
    pub detect_last_page: bool,

    /// Minimum log severity (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    1000
}

fn default_max_token_len() -> usize {
    DEFAULT_MAX_TOKEN_LEN
}

fn default_detect_last_page() -> bool {
    true
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_token_len: default_max_token_len(),
            detect_last_page: default_detect_last_page(),
            log_level: default_log_level(),
        }
    }
}

impl PagerConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string and validate it
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: PagerConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid("default_page_size must be > 0".into()));
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid("max_page_size must be > 0".into()));
        }

        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }

        if self.max_token_len == 0 {
            return Err(ConfigError::Invalid("max_token_len must be > 0".into()));
        }

        Ok(())
    }
}
