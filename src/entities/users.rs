//! Console user accounts

use chrono::{DateTime, Utc};

crate::impl_record!(
    /// A console account managed from the user administration screen
    User,
    "users",
    "user",
    ["username", "email", "full_name", "role"],
    {
        username: String,
        email: String,
        full_name: String,
        role: String,
        active: bool,
        last_login: Option<DateTime<Utc>>,
    }
);
crate::impl_toggleable!(User, active);
