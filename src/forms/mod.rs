//! Edit forms behind the create/update dialogs
//!
//! Each form is a plain struct validated with the `validator` derive. A
//! form never talks to a backend: it turns into a record which the list
//! screen then sends.

pub mod catalog;
pub mod purchase_order;
pub mod users;

pub use catalog::{ProductForm, VendorForm, WarehouseForm};
pub use purchase_order::{LineItemForm, PurchaseOrderForm};
pub use users::UserForm;

use crate::core::{ConsoleResult, Record};
use regex::Regex;
use std::sync::OnceLock;
use validator::{Validate, ValidationError};

/// A form editing one record type
pub trait RecordForm: Validate {
    type Record: Record;

    /// Prefill the form from an existing record (edit dialog)
    fn from_record(record: &Self::Record) -> Self;

    /// Copy the form fields onto a record
    fn apply_to(&self, record: &mut Self::Record);

    /// Fresh record with a new id and creation defaults
    fn blank_record() -> Self::Record;

    /// Validate and build a new record
    fn to_new_record(&self) -> ConsoleResult<Self::Record> {
        self.validate()?;
        let mut record = Self::blank_record();
        self.apply_to(&mut record);
        Ok(record)
    }

    /// Validate and apply the form to a copy of `existing`
    fn to_updated_record(&self, existing: &Self::Record) -> ConsoleResult<Self::Record> {
        self.validate()?;
        let mut record = existing.clone();
        self.apply_to(&mut record);
        Ok(record)
    }
}

fn code_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Stock codes: letters, digits, dots, dashes and underscores, starting
/// with a letter or digit
pub(crate) fn validate_code(value: &str) -> Result<(), ValidationError> {
    static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CODE_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(code_error(
            "code",
            "use letters, digits, '.', '-' or '_' only",
        ))
    }
}

/// Required text: at least one non-whitespace character
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(code_error("blank", "cannot be blank"))
    } else {
        Ok(())
    }
}

/// Optional phone number: empty, or digits with an optional leading `+`
pub(crate) fn validate_phone(value: &str) -> Result<(), ValidationError> {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 ()-]{6,19}$").unwrap());
    if value.is_empty() || regex.is_match(value) {
        Ok(())
    } else {
        Err(code_error("phone", "enter a valid phone number"))
    }
}
