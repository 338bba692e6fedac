//! Typed error handling for the console core
//!
//! This module provides an error hierarchy that lets screens react to
//! specific failures rather than dealing with generic `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`EntityError`]: Errors related to records (lookup, conflicts)
//! - [`ConfigError`]: Errors related to configuration parsing
//! - [`ValidationError`]: Errors related to form validation
//! - [`BackendError`]: Errors raised by a backend implementation
//! - [`RequestError`]: HTTP and authorization failures
//!
//! # Example
//!
//! ```rust,ignore
//! match screen.delete(id).await {
//!     Ok(()) => {}
//!     Err(ConsoleError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("Record {} already gone", id);
//!     }
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the console core
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Record-related errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Form validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// HTTP/authorization errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error payload suitable for handing to the rendering layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ConsoleError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Entity(e) => e.error_code(),
            ConsoleError::Config(_) => "CONFIG_ERROR",
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Backend(e) => e.error_code(),
            ConsoleError::Request(e) => e.error_code(),
            ConsoleError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Generic message shown to the user.
    ///
    /// Validation errors are shown verbatim so the form can point at fields;
    /// everything else collapses to a short, non-technical line.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Validation(e) => e.to_string(),
            ConsoleError::Request(RequestError::Unauthorized { .. }) => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ConsoleError::Request(RequestError::Forbidden { .. }) => {
                "You do not have permission to perform this action.".to_string()
            }
            ConsoleError::Entity(EntityError::NotFound { entity_type, .. }) => {
                format!("The requested {} could not be found.", entity_type)
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ConsoleError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            ConsoleError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ConsoleError::Request(RequestError::Status { status, .. }) => {
                Some(serde_json::json!({ "status": status }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to records
#[derive(Debug, Error)]
pub enum EntityError {
    /// Record was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Record already exists
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: Uuid },
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// A setting holds a value the screens cannot use
    #[error("Invalid {field} '{value}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Field paths that failed, in report order
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors raised by a backend implementation
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend cannot be reached
    #[error("Backend '{backend}' is unavailable")]
    Unavailable { backend: String },

    /// Lock poisoned or similar internal failure
    #[error("{backend} backend error: {message}")]
    Internal { backend: String, message: String },

    /// Response body could not be decoded
    #[error("Failed to decode {resource} response: {message}")]
    Decode { resource: String, message: String },
}

impl BackendError {
    pub fn error_code(&self) -> &'static str {
        match self {
            BackendError::Unavailable { .. } => "BACKEND_UNAVAILABLE",
            BackendError::Internal { .. } => "BACKEND_ERROR",
            BackendError::Decode { .. } => "BACKEND_DECODE_ERROR",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests and authorization
#[derive(Debug, Error)]
pub enum RequestError {
    /// Backend answered with a non-success status
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: String,
        path: String,
        status: u16,
    },

    /// Transport-level failure
    #[error("Request to {path} failed: {message}")]
    Transport { path: String, message: String },

    /// Missing or rejected credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Session lacks the required role
    #[error("Forbidden: {message}")]
    Forbidden { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Status { status: 404, .. } => "NOT_FOUND",
            RequestError::Status { .. } => "REQUEST_FAILED",
            RequestError::Transport { .. } => "TRANSPORT_ERROR",
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ConsoleError {
    fn from(err: serde_yaml::Error) -> Self {
        ConsoleError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for ConsoleError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ConsoleError::Validation(ValidationError::FieldErrors(flatten_validation_errors(
            &errors,
        )))
    }
}

/// Flatten nested `validator` errors into dotted/indexed field paths,
/// sorted by path so reports are deterministic.
pub fn flatten_validation_errors(
    errors: &validator::ValidationErrors,
) -> Vec<FieldValidationError> {
    let mut out = Vec::new();
    collect_validation_errors("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect_validation_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldValidationError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_errors(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        let path = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        ConsoleError::Request(RequestError::Transport {
            path,
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for config loaders and helpers
impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_display() {
        let err = EntityError::NotFound {
            entity_type: "product".to_string(),
            id: Uuid::nil(),
        };
        assert!(err.to_string().contains("product"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "name".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "email".to_string(),
                message: "invalid format".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("name: required"));
        assert!(display.contains("email: invalid format"));
        assert_eq!(err.fields(), vec!["name", "email"]);
    }

    #[test]
    fn test_console_error_conversion() {
        let err: ConsoleError = EntityError::NotFound {
            entity_type: "vendor".to_string(),
            id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
        assert_eq!(err.user_message(), "The requested vendor could not be found.");
    }

    #[test]
    fn test_error_response_details() {
        let err = ConsoleError::Request(RequestError::Status {
            method: "GET".to_string(),
            path: "/products".to_string(),
            status: 500,
        });
        let response = err.to_response();
        assert_eq!(response.code, "REQUEST_FAILED");
        assert_eq!(response.details, Some(serde_json::json!({ "status": 500 })));
    }

    #[test]
    fn test_backend_failure_has_generic_user_message() {
        let err = ConsoleError::Backend(BackendError::Unavailable {
            backend: "in-memory".to_string(),
        });
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
        assert_eq!(err.error_code(), "BACKEND_UNAVAILABLE");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ConsoleError = json_err.into();
        assert!(matches!(
            err,
            ConsoleError::Validation(ValidationError::InvalidJson { .. })
        ));
    }
}
