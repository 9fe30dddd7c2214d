//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Landing page
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Pawnshop intake
//! GET  /pawnshops/form              - Intake form
//! POST /pawnshops/form/process      - Store intake, redirect to /queues/request
//! GET  /pawnshops                   - Intake records (staff)
//! GET  /pawnshops/{id}              - Intake record detail (staff)
//!
//! # Queue
//! GET  /queues/request              - Issue the next number for today
//! GET  /queues/status/{id}          - Mark served, returns the ticket as JSON
//! GET  /queues/status/{id}/update   - Mark served, redirect to /queues
//! GET  /queues                      - Today's dashboard
//! GET  /queues/today                - A day's tickets as JSON (?date=YYYY-MM-DD)
//!
//! # Staff sign-in
//! GET  /login                       - Login page
//! POST /login                       - Login action
//! POST /logout                      - Logout action
//!
//! GET  /public/*                    - Static assets
//! ```

pub mod auth;
pub mod home;
pub mod pawnshops;
pub mod queues;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the pawnshop routes router.
pub fn pawnshop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pawnshops::index))
        .route("/form", get(pawnshops::form))
        .route("/form/process", post(pawnshops::process))
        .route("/{id}", get(pawnshops::show))
}

/// Create the queue routes router.
pub fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(queues::dashboard))
        .route("/request", get(queues::request))
        .route("/today", get(queues::day_json))
        .route("/status/{id}", get(queues::serve))
        .route("/status/{id}/update", get(queues::serve_and_return))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/pawnshops", pawnshop_routes())
        .nest("/queues", queue_routes())
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Build the complete application with every middleware layer applied.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.pool(), state.config());
    let public_dir = state.config().public_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/public", ServeDir::new(public_dir))
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
