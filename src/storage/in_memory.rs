//! In-memory implementation of Backend for testing and development

use crate::core::error::{BackendError, ConsoleError, EntityError};
use crate::core::{Backend, ConsoleResult, Record, Session};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory backend implementation
///
/// Useful for testing and development. Keeps records in insertion order
/// behind a RwLock. `set_unavailable(true)` makes every call fail, to
/// exercise the error paths of screens.
#[derive(Clone)]
pub struct InMemoryBackend<T: Record> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
    unavailable: Arc<AtomicBool>,
}

impl<T: Record> InMemoryBackend<T> {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a backend pre-populated with records
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            records: Arc::new(RwLock::new(map)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate an outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> ConsoleResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable {
                backend: format!("in-memory {}", T::resource_name()),
            }
            .into());
        }
        Ok(())
    }

    fn lock_error<E: std::fmt::Display>(e: E) -> ConsoleError {
        BackendError::Internal {
            backend: "in-memory".to_string(),
            message: format!("Failed to acquire lock: {}", e),
        }
        .into()
    }

    fn not_found(id: &Uuid) -> ConsoleError {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id: *id,
        }
        .into()
    }
}

impl<T: Record> Default for InMemoryBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Backend<T> for InMemoryBackend<T> {
    async fn list(&self, _session: &Session) -> ConsoleResult<Vec<T>> {
        self.check_available()?;
        let records = self.records.read().map_err(Self::lock_error)?;

        Ok(records.values().cloned().collect())
    }

    async fn get(&self, _session: &Session, id: &Uuid) -> ConsoleResult<Option<T>> {
        self.check_available()?;
        let records = self.records.read().map_err(Self::lock_error)?;

        Ok(records.get(id).cloned())
    }

    async fn create(&self, _session: &Session, record: T) -> ConsoleResult<T> {
        self.check_available()?;
        let mut records = self.records.write().map_err(Self::lock_error)?;

        if records.contains_key(&record.id()) {
            return Err(EntityError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id: record.id(),
            }
            .into());
        }
        records.insert(record.id(), record.clone());

        Ok(record)
    }

    async fn update(&self, _session: &Session, id: &Uuid, record: T) -> ConsoleResult<T> {
        self.check_available()?;
        let mut records = self.records.write().map_err(Self::lock_error)?;

        let slot = records.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        *slot = record.clone();

        Ok(record)
    }

    async fn delete(&self, _session: &Session, id: &Uuid) -> ConsoleResult<()> {
        self.check_available()?;
        let mut records = self.records.write().map_err(Self::lock_error)?;

        records
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}
