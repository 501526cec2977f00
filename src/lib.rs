//! seekpage - keyset pagination with opaque continuation tokens
//!
//! Pages are resumed from the sort-key values of the last row seen, not
//! from a numeric offset. Cost per page does not grow with depth, and a
//! token stays valid across process restarts because it carries the whole
//! position.
//!
//! ```ignore
//! use seekpage::{Filter, MemoryStore, PageExecutor, SortBuilder};
//!
//! let sort = SortBuilder::new().with_property_desc("score").with_id_asc().build()?;
//! let executor = PageExecutor::with_defaults(&store);
//!
//! let page = executor.get_page(&Filter::All, &sort, 20, None)?;
//! let next = executor.get_page(&Filter::All, &sort, 20, page.next_token.as_deref())?;
//! ```

pub mod cli;
pub mod config;
pub mod filter;
pub mod observability;
pub mod pager;
pub mod sort;
pub mod store;
pub mod token;
pub mod value;

pub use config::PagerConfig;
pub use filter::{BaseFilter, Filter, SeekComposer};
pub use pager::{Page, PageExecutor, PageRequest, PagerError, PagerResult};
pub use sort::{SortBuilder, SortCriterion, SortDirection, SortSpec};
pub use store::{DocumentStore, FindQuery, MemoryStore};
pub use token::{SeekPosition, TokenCodec};
pub use value::{Document, Scalar};
