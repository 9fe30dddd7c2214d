//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalStaff;
use crate::models::CurrentStaff;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub staff: Option<CurrentStaff>,
}

/// Display the landing page.
pub async fn home(OptionalStaff(staff): OptionalStaff) -> impl IntoResponse {
    HomeTemplate { staff }
}
