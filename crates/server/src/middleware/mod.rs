//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, only active with a DSN)
//! 2. `TraceLayer` (request span carrying `request_id`)
//! 3. Request ID (reuse or mint `x-request-id`)
//! 4. CORS
//! 5. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{OptionalStaff, RequireStaff, clear_current_staff, set_current_staff};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{create_session_layer, create_session_store};
