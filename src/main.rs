//! seekpage CLI entry point
//!
//! Parses arguments and dispatches to `cli::run`; prints errors to stderr
//! and exits non-zero on failure.

use seekpage::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
