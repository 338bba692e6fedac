//! Purchase order form with line-item bookkeeping

use super::{RecordForm, validate_not_blank};
use crate::core::ConsoleResult;
use crate::core::error::ValidationError;
use crate::entities::{LineItem, Product, PurchaseOrder, PurchaseOrderStatus, Vendor, VendorSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One editable order line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct LineItemForm {
    #[validate(required(message = "choose a product"))]
    pub product_id: Option<Uuid>,

    pub product_name: String,

    pub sku: String,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,

    #[validate(range(min = 0.0, message = "unit price cannot be negative"))]
    pub unit_price: f64,
}

impl LineItemForm {
    /// Empty line with quantity 1
    pub fn new() -> Self {
        Self {
            quantity: 1,
            ..Self::default()
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    fn to_line_item(&self) -> LineItem {
        LineItem {
            product_id: self.product_id.unwrap_or_default(),
            product_name: self.product_name.clone(),
            sku: self.sku.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

impl From<&LineItem> for LineItemForm {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: Some(item.product_id),
            product_name: item.product_name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Create/edit form of a purchase order
///
/// Always holds at least one line: a new form starts with an empty line and
/// `remove_line` refuses to drop the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PurchaseOrderForm {
    #[validate(
        length(max = 40),
        custom(function = "validate_not_blank", message = "PO number is required")
    )]
    pub po_number: String,

    #[validate(required(message = "choose a vendor"))]
    pub vendor: Option<VendorSummary>,

    pub status: PurchaseOrderStatus,

    #[validate(length(min = 1, message = "add at least one line"), nested)]
    pub items: Vec<LineItemForm>,

    #[validate(length(max = 2000))]
    pub notes: String,

    pub expected_at: Option<DateTime<Utc>>,
}

impl Default for PurchaseOrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseOrderForm {
    /// Blank draft with one empty line
    pub fn new() -> Self {
        Self {
            po_number: String::new(),
            vendor: None,
            status: PurchaseOrderStatus::Draft,
            items: vec![LineItemForm::new()],
            notes: String::new(),
            expected_at: None,
        }
    }

    /// Pick the vendor by id from the loaded vendor list
    pub fn select_vendor(&mut self, vendor_id: &Uuid, vendors: &[Vendor]) -> ConsoleResult<()> {
        let vendor = vendors
            .iter()
            .find(|v| v.id == *vendor_id)
            .ok_or_else(|| ValidationError::FieldError {
                field: "vendor".to_string(),
                message: "unknown vendor".to_string(),
            })?;
        self.vendor = Some(VendorSummary {
            id: vendor.id,
            name: vendor.name.clone(),
            shop_name: vendor.shop_name.clone(),
        });
        Ok(())
    }

    /// Append an empty line, returning its index
    pub fn add_line(&mut self) -> usize {
        self.items.push(LineItemForm::new());
        self.items.len() - 1
    }

    /// Remove a line. The last remaining line cannot be removed.
    pub fn remove_line(&mut self, index: usize) -> ConsoleResult<LineItemForm> {
        self.check_index(index)?;
        if self.items.len() <= 1 {
            return Err(ValidationError::FieldError {
                field: "items".to_string(),
                message: "a purchase order needs at least one line".to_string(),
            }
            .into());
        }
        Ok(self.items.remove(index))
    }

    /// Fill a line from a product: id, name, SKU and current price
    pub fn set_product(&mut self, index: usize, product: &Product) -> ConsoleResult<()> {
        self.check_index(index)?;
        let line = &mut self.items[index];
        line.product_id = Some(product.id);
        line.product_name = product.name.clone();
        line.sku = product.sku.clone();
        line.unit_price = product.price;
        Ok(())
    }

    /// Sum of all line subtotals
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItemForm::subtotal).sum()
    }

    fn check_index(&self, index: usize) -> ConsoleResult<()> {
        if index < self.items.len() {
            return Ok(());
        }
        Err(ValidationError::FieldError {
            field: format!("items[{}]", index),
            message: "no such line".to_string(),
        }
        .into())
    }
}

impl RecordForm for PurchaseOrderForm {
    type Record = PurchaseOrder;

    fn from_record(record: &PurchaseOrder) -> Self {
        let mut items: Vec<LineItemForm> = record.items.iter().map(LineItemForm::from).collect();
        if items.is_empty() {
            items.push(LineItemForm::new());
        }
        Self {
            po_number: record.po_number.clone(),
            vendor: Some(record.vendor.clone()),
            status: record.status,
            items,
            notes: record.notes.clone(),
            expected_at: record.expected_at,
        }
    }

    fn apply_to(&self, record: &mut PurchaseOrder) {
        record.po_number = self.po_number.trim().to_string();
        if let Some(vendor) = &self.vendor {
            record.vendor = vendor.clone();
        }
        record.status = self.status;
        record.items = self.items.iter().map(LineItemForm::to_line_item).collect();
        record.notes = self.notes.clone();
        record.expected_at = self.expected_at;
    }

    fn blank_record() -> PurchaseOrder {
        PurchaseOrder {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            ..PurchaseOrder::default()
        }
    }

    /// Received and cancelled orders are read-only
    fn to_updated_record(&self, existing: &PurchaseOrder) -> ConsoleResult<PurchaseOrder> {
        if !existing.status.is_editable() {
            return Err(ValidationError::FieldError {
                field: "status".to_string(),
                message: format!("a {} purchase order cannot be edited", existing.status),
            }
            .into());
        }
        self.validate()?;
        let mut record = existing.clone();
        self.apply_to(&mut record);
        Ok(record)
    }
}
