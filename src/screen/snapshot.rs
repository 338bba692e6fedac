//! Collection snapshot owned by a list screen

use crate::core::Record;
use uuid::Uuid;

/// The full collection a list screen fetched, in backend order.
///
/// Replaced wholesale on (re)load; after a confirmed create/update/delete
/// only the single affected element changes.
#[derive(Debug, Clone)]
pub struct Snapshot<T: Record> {
    records: Vec<T>,
    loaded: bool,
}

impl<T: Record> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Snapshot<T> {
    /// Empty, not yet loaded snapshot
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
        }
    }

    /// Whether a fetch has ever succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the whole collection after a successful fetch
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
        self.loaded = true;
    }

    pub fn get(&self, id: &Uuid) -> Option<&T> {
        self.records.iter().find(|r| r.id() == *id)
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id() == *id)
    }

    /// Append a newly created record
    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    /// Swap in a new version of a record, keeping its position.
    ///
    /// Returns the previous version, or `None` when the id is unknown.
    pub fn replace(&mut self, record: T) -> Option<T> {
        let index = self.position(&record.id())?;
        Some(std::mem::replace(&mut self.records[index], record))
    }

    /// Remove a record, keeping the order of the rest
    pub fn remove(&mut self, id: &Uuid) -> Option<T> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }
}
