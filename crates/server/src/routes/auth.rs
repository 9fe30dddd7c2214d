//! Staff sign-in route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{OptionalStaff, clear_current_staff, set_current_staff};
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Where staff land after signing in.
const AFTER_LOGIN: &str = "/queues";

// =============================================================================
// Form / Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub staff: Option<CurrentStaff>,
    pub error: Option<&'static str>,
}

fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Nama pengguna dan kata sandi wajib diisi.",
        "session" => "Sesi tidak dapat disimpan. Silakan coba lagi.",
        _ => "Terjadi kesalahan. Silakan coba lagi.",
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalStaff(staff): OptionalStaff,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        staff,
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let staff = match state
        .authenticator()
        .authenticate(&form.username, &form.password)
    {
        Ok(staff) => staff,
        Err(e) => {
            tracing::warn!(username = %form.username, "Login failed: {}", e);
            return Redirect::to("/login?error=credentials").into_response();
        }
    };

    if let Err(e) = set_current_staff(&session, &staff).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/login?error=session").into_response();
    }

    tracing::info!(username = %staff.username, "Staff signed in");
    Redirect::to(AFTER_LOGIN).into_response()
}

/// Sign out and return to the landing page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_staff(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_error_codes() {
        assert!(error_message("credentials").contains("wajib"));
        assert!(error_message("session").contains("Sesi"));
    }

    #[test]
    fn test_unknown_error_code_is_generic() {
        assert_eq!(
            error_message("<script>"),
            "Terjadi kesalahan. Silakan coba lagi."
        );
    }
}
