//! List screens and the purchase order editor
//!
//! A [`ListScreen`] is the controller behind every list page of the
//! console: it owns the fetched snapshot and the query state, and re-runs
//! the [`QueryEngine`](crate::query::QueryEngine) after each action.

pub mod chain;
pub mod controller;
pub mod snapshot;

pub use chain::{PurchaseOrderEditor, PurchaseOrderSources};
pub use controller::ListScreen;
pub use snapshot::Snapshot;
