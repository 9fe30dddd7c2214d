//! Queue route handlers.
//!
//! Customers take a number at `/queues/request`; staff mark tickets served
//! from the dashboard at `/queues`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Redirect,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ngantri_core::{BusinessCalendar, QueueStatus, QueueTicket, TicketId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalStaff;
use crate::models::CurrentStaff;
use crate::state::AppState;

// =============================================================================
// Query / Response Types
// =============================================================================

/// Query parameters for the JSON day listing.
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    /// Business date to list; defaults to today.
    pub date: Option<NaiveDate>,
}

/// JSON body for a day's queue.
#[derive(Debug, Serialize)]
pub struct DayQueue {
    pub date: NaiveDate,
    pub waiting: usize,
    pub tickets: Vec<QueueTicket>,
}

impl DayQueue {
    fn new(date: NaiveDate, tickets: Vec<QueueTicket>) -> Self {
        let waiting = tickets.iter().filter(|t| !t.status.is_served()).count();
        Self {
            date,
            waiting,
            tickets,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Freshly issued ticket.
#[derive(Template, WebTemplate)]
#[template(path = "queues/request.html")]
pub struct TicketTemplate {
    pub staff: Option<CurrentStaff>,
    pub ticket: TicketRow,
}

/// Today's queue dashboard.
#[derive(Template, WebTemplate)]
#[template(path = "queues/list.html")]
pub struct DashboardTemplate {
    pub staff: Option<CurrentStaff>,
    pub date: String,
    pub tickets: Vec<TicketRow>,
    pub waiting: usize,
}

/// A ticket prepared for display in the business timezone.
pub struct TicketRow {
    pub id: TicketId,
    pub number: i32,
    pub status: QueueStatus,
    pub issued_at: String,
}

impl TicketRow {
    fn new(ticket: &QueueTicket, calendar: &BusinessCalendar) -> Self {
        Self {
            id: ticket.id,
            number: ticket.number.get(),
            status: ticket.status,
            issued_at: calendar.local(ticket.created_at).format("%H:%M").to_string(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Issue the next number for today and show it.
#[instrument(skip(state, staff))]
pub async fn request(
    State(state): State<AppState>,
    OptionalStaff(staff): OptionalStaff,
) -> Result<TicketTemplate> {
    let ticket = state.queue().allocate_next(Utc::now()).await?;

    Ok(TicketTemplate {
        staff,
        ticket: TicketRow::new(&ticket, &state.calendar()),
    })
}

/// Mark a ticket served and return it.
#[instrument(skip(state))]
pub async fn serve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QueueTicket>> {
    let ticket = mark_served(&state, &id).await?;
    Ok(Json(ticket))
}

/// Mark a ticket served from the dashboard and go back to it.
#[instrument(skip(state))]
pub async fn serve_and_return(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    mark_served(&state, &id).await?;
    Ok(Redirect::to("/queues"))
}

async fn mark_served(state: &AppState, raw_id: &str) -> Result<QueueTicket> {
    // A malformed id cannot name any ticket.
    let id: TicketId = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("ticket {raw_id}")))?;

    Ok(state.queue().change_status(id, QueueStatus::Served).await?)
}

/// Today's queue as a dashboard.
#[instrument(skip(state, staff))]
pub async fn dashboard(
    State(state): State<AppState>,
    OptionalStaff(staff): OptionalStaff,
) -> Result<DashboardTemplate> {
    let calendar = state.calendar();
    let today = calendar.today();
    let day = DayQueue::new(today, state.queue().list_for_date(today).await?);

    Ok(DashboardTemplate {
        staff,
        date: today.format("%d-%m-%Y").to_string(),
        waiting: day.waiting,
        tickets: day
            .tickets
            .iter()
            .map(|ticket| TicketRow::new(ticket, &calendar))
            .collect(),
    })
}

/// A day's queue as JSON, today unless `?date=YYYY-MM-DD` is given.
#[instrument(skip(state))]
pub async fn day_json(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayQueue>> {
    let date = query.date.unwrap_or_else(|| state.calendar().today());
    let tickets = state.queue().list_for_date(date).await?;
    Ok(Json(DayQueue::new(date, tickets)))
}
