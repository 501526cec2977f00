//! Sort specification subsystem
//!
//! A sort spec is an ordered, non-empty list of (field, direction) pairs.
//! The first criterion is the primary key; later criteria break ties.
//!
//! # Invariants
//!
//! - A built `SortSpec` is never empty
//! - A field appears at most once
//! - Direction is always explicit per criterion
//!
//! Callers are expected to end the spec with a unique field (usually `_id`).
//! Rows with identical key tuples can be skipped or repeated across page
//! boundaries otherwise; nothing here can detect that.

mod errors;
mod spec;

pub use errors::{SortError, SortResult};
pub use spec::{SortBuilder, SortCriterion, SortDirection, SortSpec, ID_FIELD};
