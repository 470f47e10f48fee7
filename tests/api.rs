//! Router-level tests for the request paths that are decided before any
//! database access: auth gating and input validation. The pool is lazy, so
//! no Postgres instance is needed.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use dinebook::config::AppConfig;
use dinebook::routes::app;
use dinebook::state::AppState;

fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/dinebook_test")
        .unwrap();
    let config = AppConfig {
        database_url: "postgres://localhost/dinebook_test".to_string(),
        jwt_secret: "test-secret".to_string(),
        admin_api_key: "test-admin-key".to_string(),
    };
    app(AppState::new(pool, config))
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_place_rejects_missing_admin_key() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/dining-place/create")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{
                "name": "Gatsby",
                "address": "123 Main St",
                "phone_no": "1234567890",
                "operational_hours": {"open_time": "09:00:00", "close_time": "17:00:00"}
            }"#,
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["status_code"], 403);
}

#[tokio::test]
async fn create_place_rejects_wrong_admin_key() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/dining-place/create")
        .header("content-type", "application/json")
        .header("x-api-key", "not-the-key")
        .body(Body::from(
            r#"{
                "name": "Gatsby",
                "address": "123 Main St",
                "phone_no": "1234567890",
                "operational_hours": {"open_time": "09:00:00", "close_time": "17:00:00"}
            }"#,
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn book_slot_requires_bearer_token() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/dining-place/book")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"place_id": 1, "start_time": "2024-01-01T10:00:00Z", "end_time": "2024-01-01T11:00:00Z"}"#,
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn book_slot_rejects_forged_token() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/dining-place/book")
        .header("content-type", "application/json")
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::from(
            r#"{"place_id": 1, "start_time": "2024-01-01T10:00:00Z", "end_time": "2024-01-01T11:00:00Z"}"#,
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn availability_rejects_malformed_timestamp() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/dining-place/availability?place_id=1&start_time=2024-01-01%2012:00:00&end_time=2024-01-01T13:00:00Z")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["status_code"], 400);
}
