//! Field value types shared by records, the matcher and the comparator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Records expose their fields through this type so the query engine can
/// search and sort any entity without knowing its concrete struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    /// Values collected from a nested array (e.g. every line item's SKU)
    List(Vec<FieldValue>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Case-insensitive substring test.
    ///
    /// `needle` must already be lowercased. Lists match when any element
    /// matches; null and boolean values never match.
    pub fn contains_text(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.to_lowercase().contains(needle),
            FieldValue::Integer(i) => i.to_string().contains(needle),
            FieldValue::Float(f) => f.to_string().contains(needle),
            FieldValue::Uuid(u) => u.to_string().contains(needle),
            FieldValue::DateTime(dt) => dt.format("%Y-%m-%d").to_string().contains(needle),
            FieldValue::List(values) => values.iter().any(|v| v.contains_text(needle)),
            FieldValue::Boolean(_) | FieldValue::Null => false,
        }
    }

    /// Parse a date-like string into a UTC timestamp.
    ///
    /// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
    pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Total order used for sorting a pair of values.
    ///
    /// Same-kind values compare natively; integers and floats compare by
    /// exact numeric value. Strings are read as dates only when both sides
    /// are date-like. Values of different kinds fall back to a fixed kind
    /// rank, with missing and null values first, so the order is total.
    pub fn sort_cmp(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        let strings = StringOrder::for_values([a, b]);
        Self::sort_cmp_with(a, b, strings)
    }

    /// Like [`FieldValue::sort_cmp`] with the string mode fixed by the caller
    pub fn sort_cmp_with(
        a: Option<&FieldValue>,
        b: Option<&FieldValue>,
        strings: StringOrder,
    ) -> Ordering {
        SortKey::from_value(a, strings).cmp_key(&SortKey::from_value(b, strings), strings)
    }

    fn strings_are_dates(&self) -> bool {
        match self {
            FieldValue::String(s) => Self::parse_datetime(s).is_some(),
            FieldValue::List(values) => values.iter().all(FieldValue::strings_are_dates),
            _ => true,
        }
    }
}

/// How string values are ordered
///
/// A whole column is ordered one way: reading only some strings as dates
/// would mix two orders and break transitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOrder {
    /// Byte-wise comparison
    Lexical,
    /// Parsed to timestamps
    Dates,
}

impl StringOrder {
    /// `Dates` when every string among `values` parses as a date
    pub fn for_values<'a>(values: impl IntoIterator<Item = Option<&'a FieldValue>>) -> Self {
        let all_dates = values
            .into_iter()
            .flatten()
            .all(FieldValue::strings_are_dates);
        if all_dates {
            StringOrder::Dates
        } else {
            StringOrder::Lexical
        }
    }
}

/// Normalized view of a value for ordering purposes
enum SortKey<'a> {
    Absent,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
    Text(&'a str),
    Uuid(Uuid),
    List(&'a [FieldValue]),
}

impl<'a> SortKey<'a> {
    fn from_value(value: Option<&'a FieldValue>, strings: StringOrder) -> Self {
        match value {
            None | Some(FieldValue::Null) => SortKey::Absent,
            Some(FieldValue::Boolean(b)) => SortKey::Boolean(*b),
            Some(FieldValue::Integer(i)) => SortKey::Integer(*i),
            Some(FieldValue::Float(f)) if f.is_nan() => SortKey::Absent,
            Some(FieldValue::Float(f)) => SortKey::Float(*f),
            Some(FieldValue::DateTime(dt)) => SortKey::DateTime(*dt),
            Some(FieldValue::String(s)) => match strings {
                StringOrder::Dates => FieldValue::parse_datetime(s)
                    .map(SortKey::DateTime)
                    .unwrap_or(SortKey::Text(s)),
                StringOrder::Lexical => SortKey::Text(s),
            },
            Some(FieldValue::Uuid(u)) => SortKey::Uuid(*u),
            Some(FieldValue::List(values)) => SortKey::List(values),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Absent => 0,
            SortKey::Boolean(_) => 1,
            SortKey::Integer(_) | SortKey::Float(_) => 2,
            SortKey::DateTime(_) => 3,
            SortKey::Text(_) => 4,
            SortKey::Uuid(_) => 5,
            SortKey::List(_) => 6,
        }
    }

    fn cmp_key(&self, other: &SortKey<'_>, strings: StringOrder) -> Ordering {
        match (self, other) {
            (SortKey::Absent, SortKey::Absent) => Ordering::Equal,
            (SortKey::Boolean(a), SortKey::Boolean(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            // NaN never gets here, so -0.0 and 0.0 compare equal
            (SortKey::Float(a), SortKey::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Integer(a), SortKey::Float(b)) => cmp_int_float(*a, *b),
            (SortKey::Float(a), SortKey::Integer(b)) => cmp_int_float(*b, *a).reverse(),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Uuid(a), SortKey::Uuid(b)) => a.cmp(b),
            (SortKey::List(a), SortKey::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = FieldValue::sort_cmp_with(Some(x), Some(y), strings);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Exact comparison of an integer with a non-NaN float
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}
