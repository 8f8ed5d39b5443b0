// ==============================
// tests/unit/middleware_tests.rs
// ==============================
//! Unit tests for the bearer-token gate
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use backend_lib::auth::TokenService;

use crate::test_utils::{assert_error, TestApp, TEST_SECRET};

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;
    let res = app.get("/api/v1/users/me").await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .uri("/api/v1/users/me")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let res = app.send(request).await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_and_expired_tokens_are_unauthorized() {
    let app = TestApp::new().await;
    let res = app
        .request(axum::http::Method::GET, "/api/v1/users/me", Some("not.a.jwt"), None)
        .await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let expired = TokenService::new(TEST_SECRET, 24)
        .issue_at(1, chrono::Utc::now() - chrono::Duration::hours(48))
        .unwrap();
    let res = app
        .request(axum::http::Method::GET, "/api/v1/users/me", Some(&expired), None)
        .await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::new().await;
    let res = app.get("/api/v1/articles").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);

    let res = app.get("/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = TestApp::new().await;
    let res = app.get("/api/v1/nope").await;
    assert_error(&res, StatusCode::NOT_FOUND, "NOT_FOUND");
}
