//! Scalar values and the document field access seam
//!
//! Sort keys, token values and predicate operands are all `Scalar`s.
//! Stores and predicate evaluation must order scalars identically,
//! so both go through `Scalar::total_cmp`.
//!
//! Ordering rules:
//! - null < bool < number < string < id < timestamp
//! - Int and Float share the number rank and compare numerically
//! - NaN sorts below every other number

mod document;
mod scalar;

pub use document::{Document, Record};
pub use scalar::Scalar;
