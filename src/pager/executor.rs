//! Page executor
//!
//! Fetch flow (strict order):
//! 1. Validate page size
//! 2. Decode the token (fail-open: bad token means first page)
//! 3. Compose base filter AND seek predicate
//! 4. Issue exactly one store query, one row over the page size when
//!    last-page detection is on
//! 5. Derive the next token from the last kept row

use std::time::Instant;

use super::errors::{PagerError, PagerResult};
use super::page::{Page, PageRequest};
use crate::config::PagerConfig;
use crate::filter::{BaseFilter, Filter, SeekComposer};
use crate::observability::{Logger, ObservationScope, Severity};
use crate::sort::SortSpec;
use crate::store::{DocumentStore, FindQuery};
use crate::token::{SeekPosition, TokenCodec};

/// Fetches pages from a store.
///
/// Holds no state between calls; the store handle is passed in by the
/// caller (a `&S` works, since `&S` is itself a store).
pub struct PageExecutor<S: DocumentStore> {
    store: S,
    codec: TokenCodec,
    config: PagerConfig,
}

impl<S: DocumentStore> PageExecutor<S> {
    /// Creates an executor over `store`
    pub fn new(store: S, config: PagerConfig) -> Self {
        Self {
            store,
            codec: TokenCodec::new(config.max_token_len),
            config,
        }
    }

    /// Creates an executor with default configuration
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, PagerConfig::default())
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches the page after `token` (or the first page when absent)
    pub fn get_page(
        &self,
        base: &impl BaseFilter,
        sort: &SortSpec,
        page_size: usize,
        token: Option<&str>,
    ) -> PagerResult<Page<S::Document>> {
        self.fetch(base.build_filter(), sort, page_size, token, None)
    }

    /// Fetches the page described by `request`
    pub fn execute(&self, request: &PageRequest) -> PagerResult<Page<S::Document>> {
        let page_size = request.page_size.unwrap_or(self.config.default_page_size);
        self.fetch(
            request.filter.clone(),
            &request.sort,
            page_size,
            request.token.as_deref(),
            request.deadline,
        )
    }

    /// Iterates pages from `request` until no next token is issued
    pub fn pages(&self, request: PageRequest) -> Pages<'_, S> {
        Pages {
            executor: self,
            request,
            started: false,
            done: false,
        }
    }

    fn fetch(
        &self,
        base: Filter,
        sort: &SortSpec,
        page_size: usize,
        token: Option<&str>,
        deadline: Option<Instant>,
    ) -> PagerResult<Page<S::Document>> {
        if page_size == 0 || page_size > self.config.max_page_size {
            return Err(PagerError::InvalidPageSize {
                requested: page_size,
                max: self.config.max_page_size,
            });
        }

        // An empty token is the normal first-page case, not a rejection
        let position = token
            .filter(|t| !t.trim().is_empty())
            .and_then(|t| self.codec.decode(t));

        let size = page_size.to_string();
        let scope = ObservationScope::with_fields(
            "PAGE_FETCH",
            &[
                ("page_size", size.as_str()),
                ("resumed", if position.is_some() { "true" } else { "false" }),
            ],
        );

        let filter = SeekComposer::compose(base, sort, position.as_ref());
        if Logger::enabled(Severity::Trace) {
            let rendered = serde_json::to_string(&filter).unwrap_or_default();
            Logger::trace("PAGE_FILTER_COMPOSED", &[("filter", rendered.as_str())]);
        }

        let limit = if self.config.detect_last_page {
            page_size.saturating_add(1)
        } else {
            page_size
        };
        let query = FindQuery {
            filter: &filter,
            sort,
            limit,
            deadline,
        };

        let mut items = match self.store.find(&query) {
            Ok(items) => items,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(e.into());
            }
        };

        let has_more = if self.config.detect_last_page {
            let more = items.len() > page_size;
            items.truncate(page_size);
            more
        } else {
            !items.is_empty()
        };

        let next_token = match items.last() {
            Some(last) if has_more => match self.next_token(last, sort) {
                Ok(token) => Some(token),
                Err(e) => {
                    scope.fail(&e.to_string());
                    return Err(e);
                }
            },
            _ => None,
        };

        let rows = items.len().to_string();
        scope.complete_with_fields(&[
            ("rows", rows.as_str()),
            ("has_next", if next_token.is_some() { "true" } else { "false" }),
        ]);

        Ok(Page::new(items, next_token))
    }

    /// Encodes the sort-key values of `last`; missing keys travel as null
    fn next_token(&self, last: &S::Document, sort: &SortSpec) -> PagerResult<String> {
        let position = SeekPosition::from_document(last, sort);
        self.codec.encode(&position).map_err(PagerError::from)
    }
}

/// Iterator over consecutive pages.
///
/// Stops after the first page without a next token, or after an error.
/// A trailing empty page is not yielded unless it is the first page.
pub struct Pages<'e, S: DocumentStore> {
    executor: &'e PageExecutor<S>,
    request: PageRequest,
    started: bool,
    done: bool,
}

impl<S: DocumentStore> Iterator for Pages<'_, S> {
    type Item = PagerResult<Page<S::Document>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let first = !self.started;
        self.started = true;

        match self.executor.execute(&self.request) {
            Ok(page) => {
                match &page.next_token {
                    Some(token) => self.request.token = Some(token.clone()),
                    None => self.done = true,
                }
                if page.is_empty() && !first {
                    return None;
                }
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortBuilder;
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use crate::value::Scalar;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn numbered(n: i64) -> MemoryStore<Value> {
        MemoryStore::from_documents((1..=n).map(|i| json!({"_id": i})).collect())
    }

    fn ids(page: &Page<Value>) -> Vec<i64> {
        page.items.iter().map(|d| d["_id"].as_i64().unwrap()).collect()
    }

    struct CountingStore {
        inner: MemoryStore<Value>,
        calls: AtomicUsize,
        last_limit: AtomicUsize,
    }

    impl DocumentStore for CountingStore {
        type Document = Value;

        fn find(&self, query: &FindQuery<'_>) -> StoreResult<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_limit.store(query.limit, Ordering::SeqCst);
            self.inner.find(query)
        }
    }

    struct FailingStore;

    impl DocumentStore for FailingStore {
        type Document = Value;

        fn find(&self, _query: &FindQuery<'_>) -> StoreResult<Vec<Value>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_first_page() {
        let executor = PageExecutor::with_defaults(numbered(50));
        let page = executor
            .get_page(&Filter::All, &SortSpec::by_id(), 10, None)
            .unwrap();

        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
        assert!(page.has_next());
    }

    #[test]
    fn test_resume_from_token() {
        let executor = PageExecutor::with_defaults(numbered(50));
        let sort = SortSpec::by_id();

        let first = executor.get_page(&Filter::All, &sort, 10, None).unwrap();
        let second = executor
            .get_page(&Filter::All, &sort, 10, first.next_token.as_deref())
            .unwrap();

        assert_eq!(ids(&second), (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_full_last_page_has_no_token() {
        let executor = PageExecutor::with_defaults(numbered(20));
        let page = executor
            .get_page(&Filter::All, &SortSpec::by_id(), 20, None)
            .unwrap();

        assert_eq!(page.len(), 20);
        assert!(!page.has_next());
    }

    #[test]
    fn test_without_detection_non_empty_page_has_token() {
        let config = PagerConfig {
            detect_last_page: false,
            ..PagerConfig::default()
        };
        let executor = PageExecutor::new(numbered(20), config);
        let sort = SortSpec::by_id();

        let page = executor.get_page(&Filter::All, &sort, 20, None).unwrap();
        assert!(page.has_next());

        let tail = executor
            .get_page(&Filter::All, &sort, 20, page.next_token.as_deref())
            .unwrap();
        assert!(tail.is_empty());
        assert!(!tail.has_next());
    }

    #[test]
    fn test_one_query_per_call_with_lookahead_limit() {
        let store = CountingStore {
            inner: numbered(5),
            calls: AtomicUsize::new(0),
            last_limit: AtomicUsize::new(0),
        };
        let executor = PageExecutor::with_defaults(&store);

        executor
            .get_page(&Filter::All, &SortSpec::by_id(), 3, None)
            .unwrap();

        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.last_limit.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_empty_result() {
        let executor = PageExecutor::with_defaults(numbered(10));
        let page = executor
            .get_page(&Filter::gt("_id", 100), &SortSpec::by_id(), 5, None)
            .unwrap();

        assert!(page.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_malformed_token_gives_first_page() {
        let executor = PageExecutor::with_defaults(numbered(10));
        let sort = SortSpec::by_id();

        let fresh = executor.get_page(&Filter::All, &sort, 3, None).unwrap();
        let bad = executor
            .get_page(&Filter::All, &sort, 3, Some("definitely-not-a-token"))
            .unwrap();
        let blank = executor.get_page(&Filter::All, &sort, 3, Some("")).unwrap();

        assert_eq!(bad, fresh);
        assert_eq!(blank, fresh);
    }

    #[test]
    fn test_same_token_same_page() {
        let executor = PageExecutor::with_defaults(numbered(30));
        let sort = SortSpec::by_id();
        let first = executor.get_page(&Filter::All, &sort, 7, None).unwrap();
        let token = first.next_token.as_deref();

        let a = executor.get_page(&Filter::All, &sort, 7, token).unwrap();
        let b = executor.get_page(&Filter::All, &sort, 7, token).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_page_size() {
        let executor = PageExecutor::with_defaults(numbered(3));
        let sort = SortSpec::by_id();

        let err = executor.get_page(&Filter::All, &sort, 0, None).unwrap_err();
        assert_eq!(err, PagerError::InvalidPageSize { requested: 0, max: 1000 });

        let err = executor.get_page(&Filter::All, &sort, 1001, None).unwrap_err();
        assert_eq!(err.code(), "SEEK_INVALID_PAGE_SIZE");
    }

    #[test]
    fn test_store_error_propagates() {
        let executor = PageExecutor::with_defaults(FailingStore);
        let err = executor
            .get_page(&Filter::All, &SortSpec::by_id(), 5, None)
            .unwrap_err();

        assert_eq!(
            err,
            PagerError::Store(StoreError::Unavailable("connection refused".into()))
        );
    }

    #[test]
    fn test_expired_deadline_reaches_store() {
        let executor = PageExecutor::with_defaults(numbered(3));
        let request = PageRequest::new(SortSpec::by_id()).deadline(Instant::now());

        let err = executor.execute(&request).unwrap_err();
        assert_eq!(err, PagerError::Store(StoreError::DeadlineExceeded));
    }

    #[test]
    fn test_missing_leading_key_resumes_as_null() {
        let store = MemoryStore::from_documents(vec![
            json!({"_id": 1}),
            json!({"_id": 2, "rank": 5}),
            json!({"_id": 3}),
        ]);
        let sort = SortBuilder::new()
            .with_property_asc("rank")
            .with_id_asc()
            .build()
            .unwrap();
        let executor = PageExecutor::with_defaults(store);

        let first = executor.get_page(&Filter::All, &sort, 1, None).unwrap();
        assert_eq!(ids(&first), vec![1]);

        let position = executor
            .codec()
            .try_decode(first.next_token.as_deref().unwrap())
            .unwrap();
        assert_eq!(position.get("rank"), Some(&Scalar::Null));

        let second = executor
            .get_page(&Filter::All, &sort, 1, first.next_token.as_deref())
            .unwrap();
        assert_eq!(ids(&second), vec![3]);

        let third = executor
            .get_page(&Filter::All, &sort, 1, second.next_token.as_deref())
            .unwrap();
        assert_eq!(ids(&third), vec![2]);
        assert!(!third.has_next());
    }

    #[test]
    fn test_page_size_at_usize_max_does_not_overflow() {
        let config = PagerConfig {
            max_page_size: usize::MAX,
            ..PagerConfig::default()
        };
        let executor = PageExecutor::new(numbered(3), config);

        let page = executor
            .get_page(&Filter::All, &SortSpec::by_id(), usize::MAX, None)
            .unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_token_too_long_for_config_is_an_error() {
        let config = PagerConfig {
            max_token_len: 8,
            ..PagerConfig::default()
        };
        let executor = PageExecutor::new(numbered(5), config);

        let err = executor
            .get_page(&Filter::All, &SortSpec::by_id(), 2, None)
            .unwrap_err();
        assert_eq!(err.code(), "SEEK_TOKEN_TOO_LONG");
    }

    #[test]
    fn test_execute_uses_default_page_size() {
        let executor = PageExecutor::with_defaults(numbered(50));
        let page = executor.execute(&PageRequest::new(SortSpec::by_id())).unwrap();
        assert_eq!(page.len(), 20);
    }

    #[test]
    fn test_pages_iterator_visits_all() {
        let executor = PageExecutor::with_defaults(numbered(25));
        let request = PageRequest::new(SortSpec::by_id()).page_size(10);

        let pages: Vec<_> = executor.pages(request).collect::<PagerResult<_>>().unwrap();
        let sizes: Vec<_> = pages.iter().map(Page::len).collect();

        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn test_pages_iterator_skips_trailing_empty_page() {
        let config = PagerConfig {
            detect_last_page: false,
            ..PagerConfig::default()
        };
        let executor = PageExecutor::new(numbered(20), config);
        let request = PageRequest::new(SortSpec::by_id()).page_size(10);

        let sizes: Vec<_> = executor
            .pages(request)
            .map(|p| p.unwrap().len())
            .collect();

        assert_eq!(sizes, vec![10, 10]);
    }

    #[test]
    fn test_pages_iterator_yields_empty_first_page() {
        let executor = PageExecutor::with_defaults(numbered(0));
        let mut pages = executor.pages(PageRequest::new(SortSpec::by_id()));

        let first = pages.next().unwrap().unwrap();
        assert!(first.is_empty());
        assert!(pages.next().is_none());
    }

    #[test]
    fn test_pages_iterator_stops_on_error() {
        let executor = PageExecutor::with_defaults(FailingStore);
        let mut pages = executor.pages(PageRequest::new(SortSpec::by_id()));

        assert!(pages.next().unwrap().is_err());
        assert!(pages.next().is_none());
    }
}
