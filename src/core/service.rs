//! Backend trait for record CRUD operations

use crate::core::{Record, Session, error::ConsoleResult};
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for talking to the backend that owns a record type
///
/// Implementations provide CRUD operations for one record type. Screens are
/// agnostic to whether records come from REST or memory. Every call carries
/// the caller's session; implementations only read it.
#[async_trait]
pub trait Backend<T: Record>: Send + Sync {
    /// Fetch the full collection
    async fn list(&self, session: &Session) -> ConsoleResult<Vec<T>>;

    /// Fetch a record by ID
    async fn get(&self, session: &Session, id: &Uuid) -> ConsoleResult<Option<T>>;

    /// Create a new record, returning the backend's copy
    async fn create(&self, session: &Session, record: T) -> ConsoleResult<T>;

    /// Replace an existing record, returning the backend's copy
    async fn update(&self, session: &Session, id: &Uuid, record: T) -> ConsoleResult<T>;

    /// Delete a record
    async fn delete(&self, session: &Session, id: &Uuid) -> ConsoleResult<()>;
}
