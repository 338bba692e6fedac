//! Per-screen list query state

use crate::core::error::ConfigError;
use crate::query::comparator::SortDirection;
use crate::query::paginator::total_pages;
use serde::{Deserialize, Serialize};

/// Page size used when a screen does not configure one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Query state of one list screen
///
/// Single source of truth for what the screen shows. `total_records`,
/// `start_index` and `end_index` are derived: the query engine rewrites them
/// on every run.
///
/// # Example
/// ```rust,ignore
/// let mut state = QueryState::new(10);
/// state.set_search_term("bolt");   // back to page 1
/// state.toggle_sort("price");      // asc
/// state.toggle_sort("price");      // desc
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page, fixed per screen
    pub page_size: usize,

    /// Free-text search, empty for no filter
    pub search_term: String,

    /// Column to sort on, `None` for input order
    pub sort_column: Option<String>,

    /// Sort direction, `None` for input order
    pub sort_direction: Option<SortDirection>,

    /// Filtered record count of the last query
    pub total_records: usize,

    /// 1-based index of the first row shown, 0 when empty
    pub start_index: usize,

    /// 1-based index of the last row shown, 0 when empty
    pub end_index: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search_term: String::new(),
            sort_column: None,
            sort_direction: None,
            total_records: 0,
            start_index: 0,
            end_index: 0,
        }
    }

    /// Set the search term and go back to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.reset_page();
    }

    /// Set the sort column and direction and go back to the first page.
    ///
    /// An empty column clears sorting.
    pub fn set_sort(&mut self, column: impl Into<String>, direction: Option<SortDirection>) {
        let column = column.into();
        if column.is_empty() || direction.is_none() {
            self.sort_column = None;
            self.sort_direction = None;
        } else {
            self.sort_column = Some(column);
            self.sort_direction = direction;
        }
        self.reset_page();
    }

    /// Column header click: rotate `asc → desc → none` on the current column,
    /// start at `asc` on a different one.
    pub fn toggle_sort(&mut self, column: &str) {
        let next = if self.sort_column.as_deref() == Some(column) {
            SortDirection::rotate(self.sort_direction)
        } else {
            Some(SortDirection::Asc)
        };
        self.set_sort(column, next);
    }

    /// Apply a `field` / `field:asc` / `field:desc` expression
    pub fn parse_sort(&mut self, expr: &str) -> Result<(), ConfigError> {
        let (column, direction) = match expr.split_once(':') {
            Some((column, direction)) => (column, SortDirection::parse_optional(direction)?),
            None => (expr, Some(SortDirection::Asc)),
        };
        self.set_sort(column.trim(), direction);
        Ok(())
    }

    /// The active sort as a `field:direction` expression
    pub fn sort_expr(&self) -> Option<String> {
        match (&self.sort_column, self.sort_direction) {
            (Some(column), Some(direction)) => Some(format!("{}:{}", column, direction)),
            _ => None,
        }
    }

    /// Go to a page (at least 1). The engine clamps it on the next run.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Pull `page` back into `[1, max(1, total_pages)]` for `total` records.
    ///
    /// Returns true when the page changed.
    pub fn clamp_page(&mut self, total: usize) -> bool {
        let last = total_pages(total, self.page_size).max(1);
        let clamped = self.page.clamp(1, last);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Number of pages for the last query
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_records, self.page_size)
    }

    /// "Showing X–Y of Z" text for the footer
    pub fn summary(&self) -> String {
        format!(
            "Showing {}–{} of {}",
            self.start_index, self.end_index, self.total_records
        )
    }
}
