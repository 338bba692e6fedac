//! User administration form

use super::{RecordForm, validate_not_blank};
use crate::entities::User;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Roles a console account can hold
pub const ROLES: &[&str] = &["admin", "manager", "staff"];

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if ROLES.contains(&role) {
        return Ok(());
    }
    let mut error = ValidationError::new("role");
    error.message = Some(format!("role must be one of: {}", ROLES.join(", ")).into());
    Err(error)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[validate(
        length(min = 3, max = 32, message = "username must be 3 to 32 characters"),
        custom(function = "validate_not_blank", message = "username is required")
    )]
    pub username: String,

    #[validate(email(message = "enter a valid email address"))]
    pub email: String,

    #[validate(length(max = 120))]
    pub full_name: String,

    #[validate(custom(function = "validate_role"))]
    pub role: String,

    pub active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            full_name: String::new(),
            role: "staff".to_string(),
            active: true,
        }
    }
}

impl RecordForm for UserForm {
    type Record = User;

    fn from_record(record: &User) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            role: record.role.clone(),
            active: record.active,
        }
    }

    fn apply_to(&self, record: &mut User) {
        record.username = self.username.trim().to_string();
        record.email = self.email.trim().to_lowercase();
        record.full_name = self.full_name.trim().to_string();
        record.role = self.role.clone();
        record.active = self.active;
    }

    fn blank_record() -> User {
        User::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_is_active_staff() {
        let form = UserForm {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            ..UserForm::default()
        };
        let user = form.to_new_record().unwrap();
        assert_eq!(user.role, "staff");
        assert!(user.active);
        assert_eq!(user.last_login, None);
    }

    #[test]
    fn test_blank_username_is_rejected() {
        let form = UserForm {
            username: "    ".to_string(),
            email: "jdoe@example.com".to_string(),
            ..UserForm::default()
        };
        let err = form.to_new_record().unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let form = UserForm {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            role: "owner".to_string(),
            ..UserForm::default()
        };
        let err = form.to_new_record().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("role"));
    }
}
