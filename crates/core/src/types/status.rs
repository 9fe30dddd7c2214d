//! Queue ticket status.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a queue ticket.
///
/// Tickets start as `Waiting` and are moved to `Served` by staff. The store
/// does not police transitions; overwriting in either direction is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "queue_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    #[default]
    Waiting,
    Served,
}

impl QueueStatus {
    /// Lowercase wire name, matching the database enum.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Served => "served",
        }
    }

    /// Whether the customer holding the ticket has been served.
    #[must_use]
    pub const fn is_served(&self) -> bool {
        matches!(self, Self::Served)
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid queue status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for QueueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "served" => Ok(Self::Served),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}
