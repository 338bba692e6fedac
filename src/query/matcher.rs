//! Free-text matching over a record's searchable fields

use crate::core::Record;

/// Check whether a record matches a free-text search term.
///
/// The test is a case-insensitive substring match. An empty (or
/// whitespace-only) term matches every record. The record matches when ANY of
/// `fields` contains the term; fields the record does not expose never match.
///
/// # Example
/// ```rust,ignore
/// matches(&product, "abc", &["name", "sku"]); // true for sku "ABC-123"
/// ```
pub fn matches<T: Record, S: AsRef<str>>(record: &T, term: &str, fields: &[S]) -> bool {
    let needle = normalize_term(term);
    if needle.is_empty() {
        return true;
    }
    matches_normalized(record, &needle, fields)
}

/// Lowercase and trim a search term once before scanning a collection
pub(crate) fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Same as [`matches`] with a term already passed through `normalize_term`
pub(crate) fn matches_normalized<T: Record, S: AsRef<str>>(
    record: &T,
    needle: &str,
    fields: &[S],
) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .field_value(field.as_ref())
            .is_some_and(|value| value.contains_text(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Product;

    fn product(name: &str, sku: &str) -> Product {
        Product {
            name: name.to_string(),
            sku: sku.to_string(),
            ..Product::blank()
        }
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let record = product("Widget A", "W1");
        assert!(matches(&record, "", &["name"]));
        assert!(matches(&record, "   ", &["name"]));
        assert!(matches(&record, "", &[] as &[&str]));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let record = product("Bolt", "abc-123");
        assert!(matches(&record, "ABC", &["sku"]));
        assert!(matches(&record, "bOlT", &["name"]));
    }

    #[test]
    fn test_any_field_matches() {
        let record = product("Bolt", "abc-123");
        assert!(matches(&record, "123", &["name", "sku"]));
        assert!(!matches(&record, "123", &["name"]));
    }

    #[test]
    fn test_unknown_field_is_not_a_match() {
        let record = product("Bolt", "abc-123");
        assert!(!matches(&record, "bolt", &["does_not_exist"]));
    }
}
