//! Generic client-side list query engine
//!
//! One engine serves every list screen: pre-filter, free-text search, stable
//! sort and pagination over an in-memory snapshot.

use crate::core::{FieldValue, Record};
use crate::query::comparator;
use crate::query::matcher::{matches_normalized, normalize_term};
use crate::query::paginator::paginate;
use crate::query::state::QueryState;
use serde::Serialize;
use std::marker::PhantomData;

/// Result of one query run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<T> {
    /// Records on the current page
    pub data: Vec<T>,

    /// Filtered record count before pagination
    pub total: usize,
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}

/// Entity-specific filter applied before search (e.g. active/inactive)
#[derive(Debug, Clone, PartialEq)]
pub enum Prefilter {
    /// Keep records whose field equals the value
    FieldEquals { field: String, value: FieldValue },
}

impl Prefilter {
    pub fn field_equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Prefilter::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Status filter on the `active` flag
    pub fn active(active: bool) -> Self {
        Self::field_equals("active", active)
    }

    pub fn accepts<T: Record>(&self, record: &T) -> bool {
        match self {
            Prefilter::FieldEquals { field, value } => {
                record.field_value(field).as_ref() == Some(value)
            }
        }
    }
}

/// List query engine for one record type
#[derive(Debug, Clone)]
pub struct QueryEngine<T: Record> {
    search_fields: Vec<String>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Default for QueryEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> QueryEngine<T> {
    /// Engine searching the record type's own searchable fields
    pub fn new() -> Self {
        Self::with_search_fields(T::searchable_fields().iter().copied())
    }

    /// Engine searching a custom field list
    pub fn with_search_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_fields: fields.into_iter().map(Into::into).collect(),
            _record: PhantomData,
        }
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Run a query against `snapshot`.
    ///
    /// Steps: pre-filter, search, stable sort, clamp the page into range,
    /// paginate. Writes `total_records`, `start_index`, `end_index` (and the
    /// clamped `page`) back into `state`. Never fails: empty input yields an
    /// empty page, missing fields never match and sort first.
    pub fn run(
        &self,
        snapshot: &[T],
        state: &mut QueryState,
        prefilter: Option<&dyn Fn(&T) -> bool>,
    ) -> QueryResult<T> {
        let needle = normalize_term(&state.search_term);

        let mut rows: Vec<&T> = snapshot
            .iter()
            .filter(|record| prefilter.is_none_or(|keep| keep(*record)))
            .filter(|record| matches_normalized(*record, &needle, &self.search_fields))
            .collect();

        comparator::sort(
            &mut rows,
            state.sort_column.as_deref().unwrap_or(""),
            state.sort_direction,
        );

        let total = rows.len();
        if state.clamp_page(total) {
            tracing::debug!(
                resource = T::resource_name(),
                page = state.page,
                total,
                "page clamped into range"
            );
        }

        let page = paginate(&rows, state.page, state.page_size);
        state.total_records = page.total;
        state.start_index = page.start_index;
        state.end_index = page.end_index;

        tracing::debug!(
            resource = T::resource_name(),
            total,
            page = state.page,
            start = state.start_index,
            end = state.end_index,
            "list query"
        );

        QueryResult {
            data: page.items.into_iter().cloned().collect(),
            total,
        }
    }
}
