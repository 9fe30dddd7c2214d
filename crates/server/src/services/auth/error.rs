//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password was left empty.
    #[error("username and password are required")]
    MissingCredentials,

    /// Credentials were checked and rejected.
    #[error("invalid credentials")]
    InvalidCredentials,
}
