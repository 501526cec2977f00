//! CLI module for seekpage
//!
//! Provides command-line interface for:
//! - page: fetch one page from a JSON-lines collection
//! - inspect-token: decode a continuation token

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{inspect_token, load_config, page, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
