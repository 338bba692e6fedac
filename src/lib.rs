//! # Stockroom
//!
//! Client core of an inventory, warehouse and procurement console.
//!
//! ## Features
//!
//! - **One List Query Engine**: search, stable sort and pagination shared by every list screen
//! - **Record Types**: products, vendors, warehouses, venues, events, purchase orders, requests, orders, returns, users
//! - **List Screen Controller**: owned snapshot, optimistic toggles, page clamping after deletes
//! - **Forms**: `validator`-backed create/edit forms with indexed field errors
//! - **Pluggable Backends**: in-memory for tests, HTTP (feature `http`) for the real API
//! - **Configuration-Based**: page sizes, default sorts and access policies from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockroom::prelude::*;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(InMemoryBackend::with_records(products));
//! let mut screen = ListScreen::new(backend, Arc::new(session));
//! screen.load().await?;
//!
//! screen.search("widget");
//! screen.sort_by("name");
//! println!("{}", screen.summary()); // Showing 1–2 of 2
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod forms;
pub mod logging;
pub mod query;
pub mod screen;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AccessPolicy, Authenticator, Backend, ConsoleError, ConsoleResult, Credentials, FieldValue,
        Record, Session, SessionUser, Toggleable, auth::InMemoryAuthenticator,
    };

    // === Macros ===
    pub use crate::{impl_record, impl_toggleable};

    // === Records ===
    pub use crate::entities::{
        Event, LineItem, Order, OrderReturn, Product, PurchaseOrder, PurchaseOrderStatus,
        StockRequest, User, Vendor, VendorSummary, Venue, Warehouse,
    };

    // === Query ===
    pub use crate::query::{Prefilter, QueryEngine, QueryResult, QueryState, SortDirection};

    // === Screens and forms ===
    pub use crate::forms::{
        LineItemForm, ProductForm, PurchaseOrderForm, RecordForm, UserForm, VendorForm,
        WarehouseForm,
    };
    pub use crate::screen::{ListScreen, PurchaseOrderEditor, PurchaseOrderSources, Snapshot};

    // === Storage ===
    pub use crate::storage::InMemoryBackend;
    #[cfg(feature = "http")]
    pub use crate::storage::HttpBackend;

    // === Config ===
    pub use crate::config::{ApiConfig, ConsoleConfig, ScreenConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
