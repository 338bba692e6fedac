//! Shared test harness for the console integration tests
//!
//! Provides `TestItem`, a flat record covering every scalar `FieldValue`
//! kind, a `CountingBackend` that records which calls reached it, and
//! helpers for sessions and batches.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod backend_tests;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stockroom::core::error::BackendError;
use stockroom::core::{Backend, ConsoleResult, Record, Session, SessionUser};
use stockroom::storage::InMemoryBackend;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// TestItem
// ---------------------------------------------------------------------------

stockroom::impl_record!(
    /// A record with fields spanning the scalar `FieldValue` kinds.
    TestItem,
    "test-items",
    "test_item",
    ["name", "email", "category"],
    {
        name: String,
        email: String,
        category: String,
        quantity: i64,
        score: f64,
        active: bool,
        created_at: DateTime<Utc>,
    }
);
stockroom::impl_toggleable!(TestItem, active);

/// A `TestItem` with sensible defaults
pub fn item(name: &str) -> TestItem {
    TestItem {
        name: name.to_string(),
        email: format!("{}@test.com", name.to_lowercase().replace(' ', ".")),
        category: "general".to_string(),
        quantity: 1,
        score: 1.0,
        active: true,
        created_at: base_time(),
        ..TestItem::blank()
    }
}

/// Fixed point in time so sort tests are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

/// `n` items named `Item 01..n` with varied fields.
///
/// Even items are active, quantities cycle through 0..7, creation times
/// are one hour apart.
pub fn batch(n: usize) -> Vec<TestItem> {
    (1..=n)
        .map(|i| TestItem {
            quantity: (i % 7) as i64,
            score: i as f64 / 2.0,
            active: i % 2 == 0,
            category: if i % 3 == 0 { "tools" } else { "parts" }.to_string(),
            created_at: base_time() + Duration::hours(i as i64),
            ..item(&format!("Item {:02}", i))
        })
        .collect()
}

/// Names of records, in order
pub fn names(items: &[TestItem]) -> Vec<String> {
    items.iter().map(|i| i.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn session_with_roles(roles: &[&str]) -> Arc<Session> {
    Arc::new(Session::new(
        "test-token",
        SessionUser {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
    ))
}

pub fn staff_session() -> Arc<Session> {
    session_with_roles(&["staff"])
}

pub fn admin_session() -> Arc<Session> {
    session_with_roles(&["admin"])
}

// ---------------------------------------------------------------------------
// CountingBackend
// ---------------------------------------------------------------------------

/// In-memory backend that counts calls and can fail `list` on demand.
///
/// Used to check which steps of a dependent load actually ran.
#[derive(Clone)]
pub struct CountingBackend<T: Record> {
    inner: InMemoryBackend<T>,
    pub list_calls: Arc<AtomicUsize>,
    pub get_calls: Arc<AtomicUsize>,
    fail_list: bool,
}

impl<T: Record> CountingBackend<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            inner: InMemoryBackend::with_records(records),
            list_calls: Arc::new(AtomicUsize::new(0)),
            get_calls: Arc::new(AtomicUsize::new(0)),
            fail_list: false,
        }
    }

    /// Backend whose `list` always fails
    pub fn failing(records: Vec<T>) -> Self {
        Self {
            fail_list: true,
            ..Self::new(records)
        }
    }

    pub fn inner(&self) -> &InMemoryBackend<T> {
        &self.inner
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Record> Backend<T> for CountingBackend<T> {
    async fn list(&self, session: &Session) -> ConsoleResult<Vec<T>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(BackendError::Internal {
                backend: "counting".to_string(),
                message: format!("listing {} failed", T::resource_name()),
            }
            .into());
        }
        self.inner.list(session).await
    }

    async fn get(&self, session: &Session, id: &Uuid) -> ConsoleResult<Option<T>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(session, id).await
    }

    async fn create(&self, session: &Session, record: T) -> ConsoleResult<T> {
        self.inner.create(session, record).await
    }

    async fn update(&self, session: &Session, id: &Uuid, record: T) -> ConsoleResult<T> {
        self.inner.update(session, id, record).await
    }

    async fn delete(&self, session: &Session, id: &Uuid) -> ConsoleResult<()> {
        self.inner.delete(session, id).await
    }
}
