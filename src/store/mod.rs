//! Document store seam
//!
//! The pager needs one capability from a store: return up to `limit`
//! documents matching a filter, ordered by a sort spec. Index usage,
//! connections and query planning are the store's business.
//!
//! `MemoryStore` is the reference implementation, used by the CLI and tests.

mod errors;
mod memory;

use std::time::Instant;

use crate::filter::Filter;
use crate::sort::SortSpec;
use crate::value::Document;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// A single limited, sorted query
#[derive(Debug, Clone, Copy)]
pub struct FindQuery<'a> {
    /// Effective filter (base AND seek)
    pub filter: &'a Filter,
    /// Sort order
    pub sort: &'a SortSpec,
    /// Maximum rows to return
    pub limit: usize,
    /// Passed through from the caller; stores may ignore it
    pub deadline: Option<Instant>,
}

/// Trait for stores that can answer limited, sorted queries
pub trait DocumentStore {
    type Document: Document;

    /// Returns up to `query.limit` matching documents in sort order
    fn find(&self, query: &FindQuery<'_>) -> StoreResult<Vec<Self::Document>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    type Document = S::Document;

    fn find(&self, query: &FindQuery<'_>) -> StoreResult<Vec<Self::Document>> {
        (**self).find(query)
    }
}
