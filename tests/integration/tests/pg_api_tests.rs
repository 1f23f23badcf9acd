//! End-to-end tests against PostgreSQL
//!
//! Opt-in: every test returns early unless DATABASE_URL is set.
//!
//! Run with: cargo test -p integration-tests --test pg_api_tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use integration_tests::{check_test_env, test_config, RegisterRequest};
use serde_json::Value;
use todo_api::{create_app, create_app_state};
use tower::ServiceExt;

async fn pg_app() -> Router {
    let mut config = test_config();
    config.database.url = std::env::var("DATABASE_URL").unwrap_or_default();
    config.database.max_connections = 5;
    let state = create_app_state(config).await.expect("Failed to build state");
    create_app(state).expect("Failed to build app")
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_pg_login_logout_refresh() {
    if !check_test_env() {
        return;
    }
    let app = pg_app().await;

    // Postgres outlives the process, so names must not repeat across runs
    let mut user = RegisterRequest::unique();
    user.username = format!("pg{}", uuid::Uuid::new_v4().simple())[..32].to_string();
    user.email = None;

    let (status, _) = call(&app, json_request("POST", "/api/register", &user)).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = serde_json::json!({ "username": user.username, "password": user.password });
    let (status, body) = call(&app, json_request("POST", "/login", &login)).await;
    assert_eq!(status, StatusCode::OK);
    let first = body["token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, bearer("/refresh_token", &first)).await;
    assert_eq!(status, StatusCode::OK);
    let second = body["token"].as_str().unwrap().to_string();

    let (status, _) = call(&app, bearer("/member/todo", &first)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, bearer("/logout", &second)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, bearer("/member/todo", &second)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_pg_readiness() {
    if !check_test_env() {
        return;
    }
    let app = pg_app().await;

    let request = Request::builder()
        .uri("/health/ready")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["session_store"], "healthy");
}
