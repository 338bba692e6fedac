//! Field comparison and stable sorting

use crate::core::error::ConfigError;
use crate::core::{FieldValue, Record, StringOrder};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction of a list column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Next direction when a column header is clicked again:
    /// `asc → desc → none → asc`
    pub fn rotate(current: Option<SortDirection>) -> Option<SortDirection> {
        match current {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        }
    }

    /// Parse a direction where an empty string means "unsorted"
    pub fn parse_optional(s: &str) -> Result<Option<SortDirection>, ConfigError> {
        if s.trim().is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ConfigError::InvalidValue {
                field: "sort direction".to_string(),
                value: s.to_string(),
                message: "expected asc or desc".to_string(),
            }),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two records on one column.
///
/// An empty column treats every pair as equal. Missing fields compare as the
/// smallest value.
pub fn compare<T: Record>(a: &T, b: &T, column: &str) -> Ordering {
    if column.is_empty() {
        return Ordering::Equal;
    }
    FieldValue::sort_cmp(a.field_value(column).as_ref(), b.field_value(column).as_ref())
}

/// Stable in-place sort on one column.
///
/// `None` direction (or an empty column) leaves the input order untouched;
/// `Desc` reverses the comparison, not the slice, so ties keep their input
/// order in both directions. String values are ordered as dates only when
/// every string in the column parses as one.
pub fn sort<T: Record>(items: &mut [&T], column: &str, direction: Option<SortDirection>) {
    let Some(direction) = direction else {
        return;
    };
    if column.is_empty() {
        return;
    }

    // Read each key once instead of on every comparison
    let mut keyed: Vec<(Option<FieldValue>, usize)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.field_value(column), index))
        .collect();
    let strings = StringOrder::for_values(keyed.iter().map(|(value, _)| value.as_ref()));
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = FieldValue::sort_cmp_with(a.as_ref(), b.as_ref(), strings);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let sorted: Vec<&T> = keyed.iter().map(|(_, index)| items[*index]).collect();
    items.copy_from_slice(&sorted);
}
