//! Ngantri server library.
//!
//! Pawnshop intake forms and a daily numbered queue, served over HTTP.
//! The binary in `main.rs` wires this library to a listener; the
//! integration tests drive the same router directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
