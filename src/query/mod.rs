//! Client-side list querying: search, sort, paginate
//!
//! Every list screen runs the same pipeline over the collection it fetched:
//!
//! 1. optional pre-filter (status and similar)
//! 2. [`matcher`]: case-insensitive substring search across configured fields
//! 3. [`comparator`]: stable single-column sort
//! 4. [`paginator`]: page window and 1-based display bounds
//!
//! [`QueryState`] holds the screen's page, search and sort settings and
//! [`QueryEngine`] ties the steps together.

pub mod comparator;
pub mod engine;
pub mod matcher;
pub mod paginator;
pub mod state;

pub use comparator::{SortDirection, compare, sort};
pub use engine::{Prefilter, QueryEngine, QueryResult};
pub use matcher::matches;
pub use paginator::{Page, PaginationMeta, paginate};
pub use state::{DEFAULT_PAGE_SIZE, QueryState};
