//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Staff sign-in behind a pluggable authenticator

pub mod auth;
