//! Session-side models for the server.
//!
//! Domain types (tickets, intake records) live in `ngantri-core`.

pub mod session;

pub use session::{CurrentStaff, keys as session_keys};
