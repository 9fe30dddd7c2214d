//! Core types for Ngantri.
//!
//! This module provides type-safe wrappers for the queue and intake domain.

pub mod id;
pub mod intake;
pub mod status;
pub mod ticket;

pub use id::{IntakeRecordId, TicketId};
pub use intake::{IntakeRecord, NewIntakeRecord};
pub use status::{QueueStatus, UnknownStatus};
pub use ticket::{QueueTicket, TicketNumber, TicketNumberError};
