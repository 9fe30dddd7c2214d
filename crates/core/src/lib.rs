//! Ngantri Core - Shared domain types.
//!
//! This crate provides the types shared by every Ngantri component:
//! - `server` - HTTP intake form and queue counter
//! - `cli` - Command-line tools for migrations and queue maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Enabling the `postgres` feature adds the sqlx
//! encode/decode impls the server needs.
//!
//! # Modules
//!
//! - [`types`] - Ticket and intake record types, ids, statuses
//! - [`calendar`] - Business timezone and date boundaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calendar;
pub mod types;

pub use calendar::{BusinessCalendar, CalendarError};
pub use types::*;
