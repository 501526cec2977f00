//! Page result and page request types

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::filter::{BaseFilter, Filter};
use crate::sort::SortSpec;

/// One page of results.
///
/// `next_token` absent means no further page should be requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items in sort order
    pub items: Vec<T>,
    /// Token resuming after the last item
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// An empty page with no next token
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn has_next(&self) -> bool {
        self.next_token.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next_token)
    }
}

/// Everything needed to fetch one page
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Base filter, always conjoined with the seek predicate
    pub filter: Filter,
    /// Sort order
    pub sort: SortSpec,
    /// Page size; the configured default when unset
    pub page_size: Option<usize>,
    /// Token from the previous page
    pub token: Option<String>,
    /// Passed through to the store
    pub deadline: Option<Instant>,
}

impl PageRequest {
    /// First-page request over the whole collection
    pub fn new(sort: SortSpec) -> Self {
        Self {
            filter: Filter::All,
            sort,
            page_size: None,
            token: None,
            deadline: None,
        }
    }

    pub fn filter(mut self, base: &impl BaseFilter) -> Self {
        self.filter = base.build_filter();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Resume after the position encoded in `token`
    pub fn after(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline relative to now
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Instant::now() + timeout)
    }
}
