//! Purchase orders with nested vendor data and line items
//!
//! Unlike the flat records this one is written by hand: its searchable
//! fields reach into the embedded vendor and into every line item.

use crate::core::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a purchase order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "draft",
            PurchaseOrderStatus::Pending => "pending",
            PurchaseOrderStatus::Approved => "approved",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the order can still be edited
    pub fn is_editable(&self) -> bool {
        matches!(self, PurchaseOrderStatus::Draft | PurchaseOrderStatus::Pending)
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor data embedded in a purchase order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VendorSummary {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shop_name: String,
}

/// One ordered product
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Uuid,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub sku: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub po_number: String,
    pub vendor: VendorSummary,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expected_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// Sum of all line subtotals
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    fn item_values<F, V>(&self, f: F) -> FieldValue
    where
        F: Fn(&LineItem) -> V,
        V: Into<FieldValue>,
    {
        FieldValue::List(self.items.iter().map(|item| f(item).into()).collect())
    }
}

impl Record for PurchaseOrder {
    fn resource_name() -> &'static str {
        "purchase-orders"
    }

    fn resource_name_singular() -> &'static str {
        "purchase_order"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::from(self.id),
            "po_number" => FieldValue::from(self.po_number.clone()),
            "status" => FieldValue::from(self.status.as_str()),
            "notes" => FieldValue::from(self.notes.clone()),
            "created_at" => FieldValue::from(self.created_at),
            "expected_at" => FieldValue::from(self.expected_at),
            "total" => FieldValue::from(self.total()),
            "item_count" => FieldValue::from(self.items.len() as i64),
            "vendor.id" => FieldValue::from(self.vendor.id),
            "vendor.name" => FieldValue::from(self.vendor.name.clone()),
            "vendor.shop_name" => FieldValue::from(self.vendor.shop_name.clone()),
            "items.product_name" => self.item_values(|i| i.product_name.clone()),
            "items.sku" => self.item_values(|i| i.sku.clone()),
            "items.quantity" => self.item_values(|i| i.quantity),
            _ => return None,
        };
        Some(value)
    }

    fn searchable_fields() -> &'static [&'static str] {
        &[
            "po_number",
            "vendor.name",
            "vendor.shop_name",
            "status",
            "items.product_name",
            "items.sku",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::matcher::matches;

    fn order() -> PurchaseOrder {
        PurchaseOrder {
            id: Uuid::new_v4(),
            po_number: "PO-1001".to_string(),
            vendor: VendorSummary {
                id: Uuid::new_v4(),
                name: "Acme Supplies".to_string(),
                shop_name: "Acme Downtown".to_string(),
            },
            status: PurchaseOrderStatus::Pending,
            items: vec![
                LineItem {
                    product_id: Uuid::new_v4(),
                    product_name: "Hex Bolt".to_string(),
                    sku: "HB-10".to_string(),
                    quantity: 4,
                    unit_price: 2.5,
                },
                LineItem {
                    product_id: Uuid::new_v4(),
                    product_name: "Washer".to_string(),
                    sku: "WS-02".to_string(),
                    quantity: 10,
                    unit_price: 0.25,
                },
            ],
            ..PurchaseOrder::default()
        }
    }

    #[test]
    fn test_total_sums_line_items() {
        assert_eq!(order().total(), 12.5);
    }

    #[test]
    fn test_search_reaches_nested_fields() {
        let po = order();
        let fields = PurchaseOrder::searchable_fields();
        assert!(matches(&po, "downtown", fields));
        assert!(matches(&po, "ws-02", fields));
        assert!(matches(&po, "washer", fields));
        assert!(matches(&po, "PENDING", fields));
        assert!(!matches(&po, "gasket", fields));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(PurchaseOrderStatus::Approved).unwrap();
        assert_eq!(json, serde_json::json!("approved"));
        assert!(PurchaseOrderStatus::Draft.is_editable());
        assert!(!PurchaseOrderStatus::Received.is_editable());
    }

    #[test]
    fn test_nested_field_values() {
        let po = order();
        assert_eq!(
            po.field_value("vendor.name"),
            Some(FieldValue::from("Acme Supplies"))
        );
        assert_eq!(
            po.field_value("items.quantity"),
            Some(FieldValue::List(vec![
                FieldValue::Integer(4),
                FieldValue::Integer(10)
            ]))
        );
        assert_eq!(po.field_value("vendor.email"), None);
    }
}
