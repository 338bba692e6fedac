//! Product, vendor and warehouse forms

use super::{RecordForm, validate_code, validate_not_blank, validate_phone};
use crate::entities::{Product, Vendor, Warehouse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(
        length(max = 120),
        custom(function = "validate_not_blank", message = "name is required")
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 40, message = "SKU is required"),
        custom(function = "validate_code")
    )]
    pub sku: String,

    #[validate(length(max = 2000))]
    pub description: String,

    #[validate(length(max = 80))]
    pub category: String,

    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: i64,

    pub active: bool,
}

impl RecordForm for ProductForm {
    type Record = Product;

    fn from_record(record: &Product) -> Self {
        Self {
            name: record.name.clone(),
            sku: record.sku.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            price: record.price,
            quantity: record.quantity,
            active: record.active,
        }
    }

    fn apply_to(&self, record: &mut Product) {
        record.name = self.name.trim().to_string();
        record.sku = self.sku.trim().to_string();
        record.description = self.description.clone();
        record.category = self.category.trim().to_string();
        record.price = self.price;
        record.quantity = self.quantity;
        record.active = self.active;
    }

    fn blank_record() -> Product {
        Product {
            created_at: Utc::now(),
            ..Product::blank()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct VendorForm {
    #[validate(
        length(max = 120),
        custom(function = "validate_not_blank", message = "name is required")
    )]
    pub name: String,

    #[validate(length(max = 120))]
    pub shop_name: String,

    #[validate(email(message = "enter a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(max = 500))]
    pub address: String,

    pub active: bool,
}

impl RecordForm for VendorForm {
    type Record = Vendor;

    fn from_record(record: &Vendor) -> Self {
        Self {
            name: record.name.clone(),
            shop_name: record.shop_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            active: record.active,
        }
    }

    fn apply_to(&self, record: &mut Vendor) {
        record.name = self.name.trim().to_string();
        record.shop_name = self.shop_name.trim().to_string();
        record.email = self.email.trim().to_lowercase();
        record.phone = self.phone.trim().to_string();
        record.address = self.address.clone();
        record.active = self.active;
    }

    fn blank_record() -> Vendor {
        Vendor {
            created_at: Utc::now(),
            ..Vendor::blank()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct WarehouseForm {
    #[validate(
        length(max = 120),
        custom(function = "validate_not_blank", message = "name is required")
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 20, message = "code is required"),
        custom(function = "validate_code")
    )]
    pub code: String,

    pub location: String,

    #[validate(range(min = 0, message = "capacity cannot be negative"))]
    pub capacity: i64,

    pub active: bool,
}

impl RecordForm for WarehouseForm {
    type Record = Warehouse;

    fn from_record(record: &Warehouse) -> Self {
        Self {
            name: record.name.clone(),
            code: record.code.clone(),
            location: record.location.clone(),
            capacity: record.capacity,
            active: record.active,
        }
    }

    fn apply_to(&self, record: &mut Warehouse) {
        record.name = self.name.trim().to_string();
        record.code = self.code.trim().to_uppercase();
        record.location = self.location.trim().to_string();
        record.capacity = self.capacity;
        record.active = self.active;
    }

    fn blank_record() -> Warehouse {
        Warehouse::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConsoleError;
    use crate::core::error::ValidationError;

    fn valid_product() -> ProductForm {
        ProductForm {
            name: "Hex bolt".to_string(),
            sku: "HX-10".to_string(),
            price: 0.25,
            quantity: 400,
            active: true,
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_product_form_builds_record() {
        let product = valid_product().to_new_record().unwrap();
        assert_eq!(product.name, "Hex bolt");
        assert_eq!(product.sku, "HX-10");
        assert!(product.active);
        assert!(!product.id.is_nil());
    }

    #[test]
    fn test_product_form_reports_every_bad_field() {
        let form = ProductForm {
            name: String::new(),
            sku: "bad sku".to_string(),
            price: -1.0,
            ..valid_product()
        };

        match form.to_new_record() {
            Err(ConsoleError::Validation(err @ ValidationError::FieldErrors(_))) => {
                assert_eq!(err.fields(), vec!["name", "price", "sku"]);
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_update_keeps_identity() {
        let existing = valid_product().to_new_record().unwrap();
        let mut form = ProductForm::from_record(&existing);
        form.quantity = 12;

        let updated = form.to_updated_record(&existing).unwrap();
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.quantity, 12);
    }

    #[test]
    fn test_whitespace_only_names_are_rejected() {
        let product = ProductForm {
            name: "   ".to_string(),
            ..valid_product()
        };
        let vendor = VendorForm {
            name: "\t".to_string(),
            ..VendorForm::default()
        };
        let warehouse = WarehouseForm {
            name: " ".to_string(),
            code: "WH1".to_string(),
            ..WarehouseForm::default()
        };

        for result in [
            product.validate(),
            vendor.validate(),
            warehouse.validate(),
        ] {
            let errors = result.unwrap_err();
            assert!(errors.field_errors().contains_key("name"));
        }

        let sku_only_spaces = ProductForm {
            sku: "   ".to_string(),
            ..valid_product()
        };
        assert!(sku_only_spaces.to_new_record().is_err());
    }

    #[test]
    fn test_vendor_form_email() {
        let mut form = VendorForm {
            name: "Acme".to_string(),
            email: "Sales@Acme.test".to_string(),
            ..VendorForm::default()
        };
        let vendor = form.to_new_record().unwrap();
        assert_eq!(vendor.email, "sales@acme.test");

        form.email = "not-an-email".to_string();
        assert!(form.to_new_record().is_err());
    }

    #[test]
    fn test_warehouse_code_is_uppercased() {
        let form = WarehouseForm {
            name: "North".to_string(),
            code: "wh-n1".to_string(),
            capacity: 1200,
            ..WarehouseForm::default()
        };
        assert_eq!(form.to_new_record().unwrap().code, "WH-N1");
    }
}
