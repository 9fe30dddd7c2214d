//! Staff session extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentStaff, session_keys};

/// Extractor that requires a signed-in staff member.
///
/// Redirects to `/login` when nobody is signed in.
pub struct RequireStaff(pub CurrentStaff);

/// Rejection for [`RequireStaff`].
pub enum StaffRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// Session layer missing from the stack.
    NoSession,
}

impl IntoResponse for StaffRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::NoSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = StaffRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(StaffRejection::NoSession)?;

        let staff: CurrentStaff = session
            .get(session_keys::CURRENT_STAFF)
            .await
            .ok()
            .flatten()
            .ok_or(StaffRejection::RedirectToLogin)?;

        Ok(Self(staff))
    }
}

/// Extractor that optionally gets the signed-in staff member.
pub struct OptionalStaff(pub Option<CurrentStaff>);

impl<S> FromRequestParts<S> for OptionalStaff
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentStaff>(session_keys::CURRENT_STAFF)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(staff))
    }
}

/// Store the signed-in staff member in the session.
///
/// The session id is cycled to prevent fixation.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Remove the signed-in staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
