use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scheduling_cell::router::scheduling_routes;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

async fn create_test_app(server: &MockServer) -> Router {
    scheduling_routes(TestConfig::with_store_url(&server.uri()).to_arc())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn mock_profile_with_monday_window(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .and(query_param("id", "eq.pro-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "availability": [
                MockStoreResponses::availability_window("Lundi", "09:00", "11:00")
            ]
        }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn available_slots_endpoint_returns_the_day_schedule() {
    let server = MockServer::start().await;
    mock_profile_with_monday_window(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/professionals/pro-1/available-slots?date=2024-01-08")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["date"], "2024-01-08");
    let labels: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["09:00", "09:30", "10:00", "10:30"]);
}

#[tokio::test]
async fn available_days_endpoint_rejects_inverted_ranges() {
    let server = MockServer::start().await;
    let app = create_test_app(&server).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/professionals/pro-1/available-days?start=2024-01-31&end=2024-01-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calendar_events_endpoint_materializes_the_horizon() {
    let server = MockServer::start().await;
    mock_profile_with_monday_window(&server).await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/professionals/pro-1/calendar-events?months=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let events = body["events"].as_array().unwrap();
    assert!(!events.is_empty());
    for event in events {
        assert_eq!(event["isRecurring"], true);
        assert_eq!(event["parentEventId"], "pro-1:Lundi:09:00");
    }
}

#[tokio::test]
async fn calendar_events_endpoint_is_404_for_unknown_professionals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/professionals/pro-404/calendar-events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_a_free_slot_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::booking_response(
                &Uuid::new_v4().to_string(),
                "pro-1",
                "2024-01-08",
                "10:30",
                "11:30",
                "pending",
            )
        ])))
        .mount(&server)
        .await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "professionalId": "pro-1",
                        "date": "2024-01-08",
                        "startTime": "10:30"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["startTime"], "10:30");
}

#[tokio::test]
async fn booking_an_occupied_slot_is_a_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::booking_response(
                &Uuid::new_v4().to_string(),
                "pro-1",
                "2024-01-08",
                "09:30",
                "10:30",
                "confirmed",
            )
        ])))
        .mount(&server)
        .await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "professionalId": "pro-1",
                        "date": "2024-01-08",
                        "startTime": "10:00"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn losing_the_insert_race_is_a_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    // ignore-duplicates: the store answers with an empty representation when
    // the composite key already exists.
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "professionalId": "pro-1",
                        "date": "2024-01-08",
                        "startTime": "10:00"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_start_time_is_rejected_before_any_write() {
    let server = MockServer::start().await;
    let app = create_test_app(&server).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "professionalId": "pro-1",
                        "date": "2024-01-08",
                        "startTime": "half past nine"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn default_duration_cannot_wrap_past_midnight() {
    let server = MockServer::start().await;
    // No store mocks: a late start with no room for the default hour must be
    // rejected before any read or write, never persisted with an inverted
    // interval.
    let app = create_test_app(&server).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "professionalId": "pro-1",
                        "date": "2024-01-08",
                        "startTime": "23:30"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bookings_listing_filters_by_status_server_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("status", "in.(confirmed)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::booking_response(
                &Uuid::new_v4().to_string(),
                "pro-1",
                "2024-01-08",
                "09:30",
                "10:30",
                "confirmed",
            )
        ])))
        .mount(&server)
        .await;

    let app = create_test_app(&server).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/bookings?professional_id=pro-1&from=2024-01-01&to=2024-01-31&status=confirmed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["bookings"].as_array().unwrap().len(), 1);
}
