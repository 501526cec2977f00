//! Observability subsystem
//!
//! Structured JSON logging plus begin/complete scopes.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on pagination results
//! 3. No async or background threads
//!
//! # Usage
//!
//! ```ignore
//! use seekpage::observability::{Logger, ObservationScope};
//!
//! Logger::warn("TOKEN_REJECTED", &[("code", "SEEK_TOKEN_MALFORMED")]);
//!
//! let scope = ObservationScope::new("PAGE_FETCH");
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
