//! Staff authentication.
//!
//! Sign-in is a placeholder: [`PlaceholderAuthenticator`] accepts any
//! non-empty username and password. Real credential checks plug in by
//! implementing [`StaffAuthenticator`] and handing it to
//! [`AppState::with_authenticator`](crate::state::AppState::with_authenticator).

mod error;

pub use error::AuthError;

use chrono::Utc;

use crate::models::CurrentStaff;

/// Verifies staff credentials.
pub trait StaffAuthenticator: Send + Sync {
    /// Check a username/password pair and return the signed-in staff member.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the credentials are rejected.
    fn authenticate(&self, username: &str, password: &str) -> Result<CurrentStaff, AuthError>;
}

/// Accepts any non-empty credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAuthenticator;

impl StaffAuthenticator for PlaceholderAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<CurrentStaff, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(CurrentStaff {
            username: username.to_owned(),
            signed_in_at: Utc::now(),
        })
    }
}
