//! Record types displayed by the console screens
//!
//! These are display projections of backend entities; the backend owns the
//! canonical schema.

pub mod catalog;
pub mod fulfilment;
pub mod macros;
pub mod purchase_order;
pub mod users;
pub mod venues;

pub use catalog::{Product, Vendor, Warehouse};
pub use fulfilment::{Order, OrderReturn, StockRequest};
pub use purchase_order::{LineItem, PurchaseOrder, PurchaseOrderStatus, VendorSummary};
pub use users::User;
pub use venues::{Event, Venue};
