//! Filter subsystem
//!
//! - `Filter`: the predicate algebra shared with stores (eq, gt, gte, lt,
//!   lte, and, or, always-true)
//! - `SeekComposer`: turns a sort spec plus a seek position into the
//!   "strictly after this row" predicate and conjoins it with a base filter
//! - `FilterEvaluator`: evaluates a filter against a document, used by the
//!   in-memory store
//!
//! # Seek predicate shape
//!
//! `(k1, .., kn) > (v1, .., vn)` in sort order is rewritten as
//!
//! ```text
//! k1 >1 v1
//! OR (k1 = v1 AND k2 >2 v2)
//! OR ...
//! OR (k1 = v1 AND .. AND k(n-1) = v(n-1) AND kn >n vn)
//! ```
//!
//! where `>i` is `>` for ascending keys and `<` for descending ones.
//! Stores only need single-field comparisons, not tuple comparison.

mod ast;
mod compose;
mod eval;

pub use ast::{BaseFilter, Filter, FilterOp, Predicate};
pub use compose::SeekComposer;
pub use eval::FilterEvaluator;
