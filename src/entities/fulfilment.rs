//! Stock requests, customer orders and returns

use chrono::{DateTime, Utc};

crate::impl_record!(
    /// A request to move stock out of a warehouse
    StockRequest,
    "requests",
    "request",
    ["request_number", "requested_by", "warehouse_name", "status"],
    {
        request_number: String,
        requested_by: String,
        warehouse_name: String,
        status: String,
        notes: String,
        created_at: DateTime<Utc>,
    }
);

crate::impl_record!(
    Order,
    "orders",
    "order",
    ["order_number", "customer_name", "status"],
    {
        order_number: String,
        customer_name: String,
        status: String,
        total: f64,
        placed_at: DateTime<Utc>,
    }
);

crate::impl_record!(
    OrderReturn,
    "returns",
    "return",
    ["return_number", "order_number", "reason", "status"],
    {
        return_number: String,
        order_number: String,
        reason: String,
        status: String,
        created_at: DateTime<Utc>,
    }
);
