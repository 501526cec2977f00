//! Page executor subsystem
//!
//! Ties the token codec, seek composer and store together.
//!
//! # Guarantees
//!
//! - Page order is the store's sort order restricted to the effective filter
//! - `page_size` is an upper bound
//! - Exactly one store query per fetch; no retries, no caching
//! - No state between calls; each fetch is independent
//!
//! # Next-token policy
//!
//! With last-page detection (the default) the store is asked for one row
//! beyond the page size. The token is issued only if that row exists, so
//! an exactly-full final page carries no token. Without detection any
//! non-empty page carries a token and the end shows up as an empty page.

mod errors;
mod executor;
mod page;

pub use errors::{PagerError, PagerResult};
pub use executor::{PageExecutor, Pages};
pub use page::{Page, PageRequest};
