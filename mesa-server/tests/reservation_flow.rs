//! End-to-end flow over the HTTP router: create → seat → finish/cancel,
//! plus the validation and conflict status codes the dashboard relies on.

use axum::body::Body;
use axum::Router;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use mesa_server::core::server::build_router;
use mesa_server::core::{Config, ServerState};
use mesa_server::db::DbService;

// 2099-06-05 is a Friday, comfortably in the future and not a closed day.
const DATE: &str = "2099-06-05";

async fn app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    DbService::migrate(&pool).await.unwrap();

    let config = Config {
        work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
        http_port: 0,
        database_path: None,
        timezone: chrono_tz::Europe::Lisbon,
        environment: "test".into(),
    };
    build_router(ServerState::for_pool(config, pool))
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ada_payload() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "L",
        "mobile_number": "555-0100",
        "reservation_date": DATE,
        "reservation_time": "18:00",
        "people": 2
    })
}

#[tokio::test]
async fn create_seat_finish_lifecycle() {
    let app = app().await;

    // Create → booked
    let (status, reservation) =
        send(&app, Method::POST, "/api/reservations", Some(ada_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reservation["status"], "booked");
    let reservation_id = reservation["id"].as_i64().unwrap();

    // Direct seating through the status API is illegal
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/reservations/{reservation_id}/status"),
        Some(json!({ "status": "seated" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_transition");

    // Create a table and seat through it
    let (status, table) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({ "name": "Bar #1", "capacity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let table_id = table["id"].as_i64().unwrap();

    let (status, table) = send(
        &app,
        Method::PUT,
        &format!("/api/tables/{table_id}/seat"),
        Some(json!({ "reservation_id": reservation_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["reservation_id"].as_i64(), Some(reservation_id));

    let (_, reservation) = send(
        &app,
        Method::GET,
        &format!("/api/reservations/{reservation_id}"),
        None,
    )
    .await;
    assert_eq!(reservation["status"], "seated");

    // Finish clears the table and the reservation in one observable step
    let (status, table) = send(
        &app,
        Method::DELETE,
        &format!("/api/tables/{table_id}/seat"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(table["reservation_id"].is_null());

    let (_, reservation) = send(
        &app,
        Method::GET,
        &format!("/api/reservations/{reservation_id}"),
        None,
    )
    .await;
    assert_eq!(reservation["status"], "finished");

    // finished is terminal
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/reservations/{reservation_id}/status"),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn cancel_from_booked() {
    let app = app().await;
    let (_, reservation) =
        send(&app, Method::POST, "/api/reservations", Some(ada_payload())).await;
    let id = reservation["id"].as_i64().unwrap();

    let (status, reservation) = send(
        &app,
        Method::PUT,
        &format!("/api/reservations/{id}/status"),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reservation["status"], "cancelled");
}

#[tokio::test]
async fn create_validation_failures() {
    let app = app().await;

    let mut zero_people = ada_payload();
    zero_people["people"] = json!(0);
    let (status, body) = send(&app, Method::POST, "/api/reservations", Some(zero_people)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // 2099-06-02 is a Tuesday — closed day
    let mut tuesday = ada_payload();
    tuesday["reservation_date"] = json!("2099-06-02");
    let (status, _) = send(&app, Method::POST, "/api/reservations", Some(tuesday)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut past = ada_payload();
    past["reservation_date"] = json!("2020-06-05");
    let (status, _) = send(&app, Method::POST, "/api/reservations", Some(past)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut late = ada_payload();
    late["reservation_time"] = json!("22:00");
    let (status, _) = send(&app, Method::POST, "/api/reservations", Some(late)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A create payload may not pre-set a lifecycle position
    let mut seated = ada_payload();
    seated["status"] = json!("seated");
    let (status, _) = send(&app, Method::POST, "/api/reservations", Some(seated)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown status strings are rejected at the boundary
    let (_, reservation) =
        send(&app, Method::POST, "/api/reservations", Some(ada_payload())).await;
    let id = reservation["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/reservations/{id}/status"),
        Some(json!({ "status": "no-show" })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn listing_is_date_scoped_and_time_sorted() {
    let app = app().await;

    let mut late = ada_payload();
    late["reservation_time"] = json!("20:30");
    send(&app, Method::POST, "/api/reservations", Some(late)).await;
    send(&app, Method::POST, "/api/reservations", Some(ada_payload())).await;

    let mut other_day = ada_payload();
    other_day["reservation_date"] = json!("2099-06-06");
    send(&app, Method::POST, "/api/reservations", Some(other_day)).await;

    let (status, listed) = send(
        &app,
        Method::GET,
        &format!("/api/reservations?date={DATE}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let times: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reservation_time"].as_str().unwrap())
        .collect();
    assert_eq!(times, ["18:00", "20:30"]);

    // Zero matches is an empty sequence, not an error
    let (status, listed) = send(
        &app,
        Method::GET,
        "/api/reservations?date=2099-06-08",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn occupied_table_conflicts_and_unknown_ids_miss() {
    let app = app().await;

    let (_, first) = send(&app, Method::POST, "/api/reservations", Some(ada_payload())).await;
    let (_, second) = send(&app, Method::POST, "/api/reservations", Some(ada_payload())).await;
    let (_, table) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({ "name": "Bar #1", "capacity": 4 })),
    )
    .await;
    let table_id = table["id"].as_i64().unwrap();

    send(
        &app,
        Method::PUT,
        &format!("/api/tables/{table_id}/seat"),
        Some(json!({ "reservation_id": first["id"] })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/tables/{table_id}/seat"),
        Some(json!({ "reservation_id": second["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_occupied");

    let (status, body) = send(&app, Method::GET, "/api/reservations/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    // Finishing a free table is a validation error
    let (status, _) = send(&app, Method::DELETE, "/api/tables/9999/seat", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_database_status() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}
