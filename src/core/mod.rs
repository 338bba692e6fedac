//! Core module containing fundamental traits and types for the console

pub mod auth;
pub mod error;
pub mod field;
pub mod record;
pub mod service;

pub use auth::{AccessPolicy, Authenticator, Credentials, Session, SessionUser};
pub use error::{ConsoleError, ConsoleResult};
pub use field::{FieldValue, StringOrder};
pub use record::{Record, Toggleable};
pub use service::Backend;
