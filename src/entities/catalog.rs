//! Catalog records: products, vendors and warehouses

use chrono::{DateTime, Utc};

crate::impl_record!(
    /// A stock-keeping product
    Product,
    "products",
    "product",
    ["name", "sku", "category"],
    {
        name: String,
        sku: String,
        description: String,
        category: String,
        price: f64,
        quantity: i64,
        active: bool,
        created_at: DateTime<Utc>,
    }
);
crate::impl_toggleable!(Product, active);

crate::impl_record!(
    /// A supplier purchase orders are placed with
    Vendor,
    "vendors",
    "vendor",
    ["name", "shop_name", "email", "phone"],
    {
        name: String,
        shop_name: String,
        email: String,
        phone: String,
        address: String,
        active: bool,
        created_at: DateTime<Utc>,
    }
);
crate::impl_toggleable!(Vendor, active);

crate::impl_record!(
    Warehouse,
    "warehouses",
    "warehouse",
    ["name", "code", "location"],
    {
        name: String,
        code: String,
        location: String,
        capacity: i64,
        active: bool,
    }
);
crate::impl_toggleable!(Warehouse, active);
