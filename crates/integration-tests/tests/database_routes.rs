//! Router behaviour backed by `PostgreSQL`.
//!
//! Ignored by default; set `NGANTRI_TEST_DATABASE_URL` and run with
//! `--ignored`. Queue tests use their own business dates and clear them
//! first, so they can share a database with `queue_allocation`.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ngantri_core::{BusinessCalendar, NewIntakeRecord, QueueStatus, TicketId};
use ngantri_integration_tests::database_app;
use ngantri_server::db::{PawnshopRepository, QueueRepository};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Noon at UTC+7 on the given date.
fn noon_on(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(5, 0, 0).unwrap())
}

fn queue(pool: &PgPool) -> QueueRepository<'_> {
    QueueRepository::new(pool, BusinessCalendar::default())
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, uri: &str, body: &'static str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Sign in as a teller and return the `Cookie` header value to send back.
async fn sign_in(app: &Router) -> String {
    let response = post_form(app, "/login", "username=teller01&password=hunter2").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/queues");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    set_cookie.split(';').next().unwrap().to_owned()
}

async fn get_as_staff(app: &Router, uri: &str, cookie: &str) -> Response {
    let request = Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// =============================================================================
// Intake
// =============================================================================

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_intake_submission_sends_customer_to_queue() {
    let (app, _pool) = database_app().await.unwrap();

    let response = post_form(
        &app,
        "/pawnshops/form/process",
        "nama-lengkap=Rina+Wati&cara-pembayaran=Tunai&barang-jaminan=Kalung+emas\
         &alamat=Bandung&nomor-hp=0812000111",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/queues/request");
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_staff_can_browse_intake_records() {
    let (app, pool) = database_app().await.unwrap();
    let record = PawnshopRepository::new(&pool)
        .add(&NewIntakeRecord {
            full_name: "Agus Salim".to_string(),
            payment_method: "Tunai".to_string(),
            collateral_item: "Gelang emas".to_string(),
            address: "Jl. Merdeka 1, Bogor".to_string(),
            phone: "0813444555".to_string(),
            ..NewIntakeRecord::default()
        })
        .await
        .unwrap();
    let cookie = sign_in(&app).await;

    let response = get_as_staff(&app, "/pawnshops", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Agus Salim"));

    let response = get_as_staff(&app, &format!("/pawnshops/{}", record.id), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Gelang emas"));
    assert!(body.contains("0813444555"));

    let response = get_as_staff(&app, "/pawnshops/2147483647", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_as_staff(&app, "/pawnshops/abc", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Queue
// =============================================================================

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_queue_request_shows_a_ticket() {
    let (app, _pool) = database_app().await.unwrap();

    let response = get(&app, "/queues/request").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_serving_returns_the_served_ticket() {
    let day = date(2001, 2, 1);
    let (app, pool) = database_app().await.unwrap();
    queue(&pool).delete_for_date(day).await.unwrap();
    let ticket = queue(&pool).allocate_next(noon_on(day)).await.unwrap();

    let response = get(&app, &format!("/queues/status/{}", ticket.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], ticket.id.to_string());
    assert_eq!(json["number"], 1);
    assert_eq!(json["status"], "served");

    let stored = queue(&pool).get(ticket.id).await.unwrap().unwrap();
    assert_eq!(stored.status, QueueStatus::Served);
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_serving_unknown_ticket_is_not_found() {
    let (app, _pool) = database_app().await.unwrap();

    let response = get(&app, &format!("/queues/status/{}", TicketId::generate())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_serving_from_dashboard_redirects_back() {
    let day = date(2001, 2, 2);
    let (app, pool) = database_app().await.unwrap();
    queue(&pool).delete_for_date(day).await.unwrap();
    let ticket = queue(&pool).allocate_next(noon_on(day)).await.unwrap();

    let response = get(&app, &format!("/queues/status/{}/update", ticket.id)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/queues");

    let stored = queue(&pool).get(ticket.id).await.unwrap().unwrap();
    assert_eq!(stored.status, QueueStatus::Served);
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_day_json_lists_tickets_in_number_order() {
    let day = date(2001, 2, 3);
    let (app, pool) = database_app().await.unwrap();
    queue(&pool).delete_for_date(day).await.unwrap();

    let mut tickets = Vec::new();
    for _ in 0..3 {
        tickets.push(queue(&pool).allocate_next(noon_on(day)).await.unwrap());
    }
    queue(&pool)
        .change_status(tickets[1].id, QueueStatus::Served)
        .await
        .unwrap();

    let response = get(&app, "/queues/today?date=2001-02-03").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["date"], "2001-02-03");
    assert_eq!(json["waiting"], 2);

    let listed = json["tickets"].as_array().unwrap();
    let numbers: Vec<i64> = listed.iter().map(|t| t["number"].as_i64().unwrap()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(listed[1]["status"], "served");
}
