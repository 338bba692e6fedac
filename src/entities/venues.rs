//! Venue and event records

use chrono::{DateTime, Utc};

crate::impl_record!(
    Venue,
    "venues",
    "venue",
    ["name", "address", "city"],
    {
        name: String,
        address: String,
        city: String,
        capacity: i64,
        active: bool,
    }
);
crate::impl_toggleable!(Venue, active);

crate::impl_record!(
    /// An event hosted at a venue that stock is allocated to
    Event,
    "events",
    "event",
    ["name", "venue_name", "status"],
    {
        name: String,
        venue_name: String,
        status: String,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
    }
);
