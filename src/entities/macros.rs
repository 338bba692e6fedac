//! Macros for reducing boilerplate when defining records
//!
//! Most console screens show flat records: an id plus a handful of scalar
//! fields. These macros generate the struct, its serde derives and the
//! `Record` implementation mapping every field name to a `FieldValue`.

/// Create a flat record type with an automatic `Record` implementation
///
/// Every listed field must be `Clone + Into<FieldValue>` so it can be
/// searched and sorted by name.
///
/// # Example
///
/// ```rust,ignore
/// use stockroom::prelude::*;
///
/// impl_record!(
///     Warehouse,
///     "warehouses",
///     "warehouse",
///     ["name", "code"],
///     {
///         name: String,
///         code: String,
///         capacity: i64,
///     }
/// );
///
/// let warehouse = Warehouse::new("Main".to_string(), "WH-1".to_string(), 500);
/// assert_eq!(warehouse.field_value("code"), Some(FieldValue::from("WH-1")));
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $(#[$meta:meta])*
        $type:ident,
        $resource:expr,
        $singular:expr,
        [ $( $searchable:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this record
            pub id: ::uuid::Uuid,
            $(
                $(#[$field_meta])*
                #[serde(default)]
                pub $field : $field_type,
            )*
        }

        impl $crate::core::record::Record for $type {
            fn resource_name() -> &'static str {
                $resource
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::from(self.id)),
                    $(
                        stringify!($field) => Some($crate::core::field::FieldValue::from(
                            self.$field.clone(),
                        )),
                    )*
                    _ => None,
                }
            }

            fn searchable_fields() -> &'static [&'static str] {
                &[ $( $searchable ),* ]
            }
        }

        impl $type {
            /// Create a new record with a fresh id
            #[allow(clippy::too_many_arguments)]
            pub fn new( $( $field: $field_type ),* ) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    $( $field ),*
                }
            }

            /// An empty record with a fresh id, used as the starting point of
            /// create forms
            pub fn blank() -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    ..Default::default()
                }
            }
        }
    };
}

/// Implement `Toggleable` for a record with a `bool` status field
///
/// # Example
/// ```rust,ignore
/// impl_toggleable!(Warehouse, active);
/// ```
#[macro_export]
macro_rules! impl_toggleable {
    ($type:ident, $flag:ident) => {
        impl $crate::core::record::Toggleable for $type {
            fn is_active(&self) -> bool {
                self.$flag
            }

            fn set_active(&mut self, active: bool) {
                self.$flag = active;
            }
        }
    };
}
