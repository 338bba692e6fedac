//! Record traits defining what the query engine and screens need from an entity

use crate::core::field::FieldValue;
use uuid::Uuid;

/// Base trait for every record a list screen displays.
///
/// A record is the front end's projection of a backend entity. It has:
/// - an immutable `id`
/// - a REST resource name (e.g. "products", "purchase-orders")
/// - dynamic field access for search and sort
/// - a static list of searchable fields
pub trait Record: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "products", "purchase-orders")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "product", "purchase_order")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the value of a field by name.
    ///
    /// Nested values use dotted paths (`vendor.name`, `items.sku`). Returns
    /// `None` for unknown fields.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Fields searched by the free-text filter
    fn searchable_fields() -> &'static [&'static str];
}

/// Records carrying an active/inactive flag that list screens can toggle
pub trait Toggleable: Record {
    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestRecord {
        id: Uuid,
        name: String,
        active: bool,
    }

    impl Record for TestRecord {
        fn resource_name() -> &'static str {
            "test-records"
        }

        fn resource_name_singular() -> &'static str {
            "test_record"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(FieldValue::from(self.name.clone())),
                "active" => Some(FieldValue::from(self.active)),
                _ => None,
            }
        }

        fn searchable_fields() -> &'static [&'static str] {
            &["name"]
        }
    }

    impl Toggleable for TestRecord {
        fn is_active(&self) -> bool {
            self.active
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    #[test]
    fn test_record_metadata() {
        assert_eq!(TestRecord::resource_name(), "test-records");
        assert_eq!(TestRecord::resource_name_singular(), "test_record");
        assert_eq!(TestRecord::searchable_fields(), &["name"]);
    }

    #[test]
    fn test_toggle_active() {
        let mut record = TestRecord {
            id: Uuid::new_v4(),
            name: "Widget".to_string(),
            active: true,
        };
        record.set_active(false);
        assert!(!record.is_active());
        assert_eq!(record.field_value("active"), Some(FieldValue::Boolean(false)));
        assert_eq!(record.field_value("missing"), None);
    }
}
