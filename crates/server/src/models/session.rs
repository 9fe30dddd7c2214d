//! Session-related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-stored staff identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// Name the staff member signed in with.
    pub username: String,
    /// When they signed in.
    pub signed_in_at: DateTime<Utc>,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the signed-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";
}
