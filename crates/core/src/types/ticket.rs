//! Queue tickets and their per-day numbers.

use core::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{QueueStatus, TicketId};

/// Errors that can occur when constructing a [`TicketNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketNumberError {
    /// Numbers start at 1.
    #[error("ticket number must be positive (got {0})")]
    NotPositive(i32),
}

/// A queue number within one business day.
///
/// Numbers are dense per day: the first ticket of a day is `1` and every
/// later ticket that day is exactly one more than the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct TicketNumber(i32);

impl TicketNumber {
    /// Create a ticket number, rejecting zero and negatives.
    ///
    /// # Errors
    ///
    /// Returns [`TicketNumberError::NotPositive`] for values below 1.
    pub const fn new(value: i32) -> Result<Self, TicketNumberError> {
        if value < 1 {
            return Err(TicketNumberError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A numbered place in the day's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct QueueTicket {
    /// Unique ticket id.
    pub id: TicketId,
    /// Waiting or served.
    pub status: QueueStatus,
    /// Business date the number belongs to.
    pub issued_on: NaiveDate,
    /// Position within `issued_on`.
    pub number: TicketNumber,
    /// When the number was allocated.
    pub created_at: DateTime<Utc>,
}
