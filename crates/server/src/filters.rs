//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Human label for a queue status.
///
/// Usage in templates: `{{ ticket.status|status_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn status_label(status: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(label_for(&status.to_string()))
}

fn label_for(status: &str) -> &'static str {
    match status {
        "waiting" => "Menunggu",
        "served" => "Sudah dilayani",
        _ => "Tidak diketahui",
    }
}
