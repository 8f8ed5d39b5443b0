// ==============================
// tests/integration/user_tests.rs
// ==============================
//! The `/users/me` endpoints
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::test_utils::{assert_error, TestApp};

#[tokio::test]
async fn test_current_user_has_no_password() {
    let app = TestApp::new().await;
    let token = app.user("erin").await;

    let res = app
        .request(Method::GET, "/api/v1/users/me", Some(&token), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let user = &res.body["data"];
    assert_eq!(user["username"], "erin");
    assert_eq!(user["email"], "erin@example.com");
    assert!(user["avatar"].is_null());
    assert!(user.get("password").is_none());
    assert!(!res.body.to_string().contains("$scrypt$"));
}

#[tokio::test]
async fn test_update_applies_only_non_empty_fields() {
    let app = TestApp::new().await;
    let token = app.user("frank").await;

    let res = app
        .request(
            Method::PUT,
            "/api/v1/users/me",
            Some(&token),
            Some(json!({ "username": "", "avatar": "https://img.example.com/f.png" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "updated");
    assert_eq!(res.body["data"]["username"], "frank");
    assert_eq!(res.body["data"]["avatar"], "https://img.example.com/f.png");

    let res = app
        .request(
            Method::PUT,
            "/api/v1/users/me",
            Some(&token),
            Some(json!({ "username": "franklin", "avatar": "" })),
        )
        .await;
    assert_eq!(res.body["data"]["username"], "franklin");
    assert_eq!(res.body["data"]["avatar"], "https://img.example.com/f.png");

    let res = app
        .request(Method::GET, "/api/v1/users/me", Some(&token), None)
        .await;
    assert_eq!(res.body["data"]["username"], "franklin");
}

#[tokio::test]
async fn test_update_rejects_username_of_another_user() {
    let app = TestApp::new().await;
    app.user("grace").await;
    let token = app.user("heidi").await;

    let res = app
        .request(
            Method::PUT,
            "/api/v1/users/me",
            Some(&token),
            Some(json!({ "username": "grace" })),
        )
        .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "INVALID_INPUT");

    // keeping one's own name is not a conflict
    let res = app
        .request(
            Method::PUT,
            "/api/v1/users/me",
            Some(&token),
            Some(json!({ "username": "heidi" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_of_vanished_user_is_not_found() {
    let app = TestApp::new().await;
    let token = app.state.auth.issue_token(9_999).unwrap();
    let res = app
        .request(Method::GET, "/api/v1/users/me", Some(&token), None)
        .await;
    assert_error(&res, StatusCode::NOT_FOUND, "NOT_FOUND");
}
