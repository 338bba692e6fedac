//! Page slicing and display bounds

use serde::Serialize;

/// One page of a filtered, sorted sequence
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// 1-based index of the first item shown, 0 when empty
    pub start_index: usize,

    /// 1-based index of the last item shown, 0 when empty
    pub end_index: usize,

    /// Length of the sequence before slicing
    pub total: usize,

    /// Pagination metadata for the pagination widget
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Page and limit are at least 1 so the arithmetic below never underflows
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total_pages(total, limit);
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

/// Number of pages needed for `total` items, 0 when there are none
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if total == 0 {
        0
    } else {
        total.div_ceil(page_size.max(1))
    }
}

/// Slice `items` into the requested page.
///
/// The window is `[(page - 1) * page_size, min(page * page_size, total))`;
/// `start_index` is the window start plus one and `end_index` the window end,
/// both 1-based for "Showing X–Y of Z". A page past the end yields an empty
/// page with both indices at 0 rather than panicking.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let meta = PaginationMeta::new(page, page_size, total);
    let start = (meta.page - 1).saturating_mul(meta.limit);

    if total == 0 || start >= total {
        return Page {
            items: Vec::new(),
            start_index: 0,
            end_index: 0,
            total,
            meta,
        };
    }

    let end = start.saturating_add(meta.limit).min(total);
    Page {
        items: items[start..end].to_vec(),
        start_index: start + 1,
        end_index: end,
        total,
        meta,
    }
}
