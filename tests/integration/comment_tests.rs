// =================================
// tests/integration/comment_tests.rs
// =================================
//! Comment endpoints and deletion permissions
use axum::http::{Method, StatusCode};
use backend_lib::storage::Storage;
use serde_json::json;

use crate::test_utils::{assert_error, TestApp};

#[tokio::test]
async fn test_any_user_may_comment_and_list() {
    let app = TestApp::new().await;
    let author = app.user("nina").await;
    let reader = app.user("oscar").await;
    let article = app.create_article(&author, "T", "C").await;

    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/articles/{article}/comments"),
            Some(&reader),
            Some(json!({ "content": "nice post" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "comment posted");
    assert_eq!(res.body["data"]["article_id"], article);
    assert_eq!(res.body["data"]["author"]["username"], "oscar");

    app.create_comment(&author, article, "thanks").await;

    let res = app
        .get(&format!("/api/v1/articles/{article}/comments"))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let comments = res.body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    // newest first
    assert_eq!(comments[0]["content"], "thanks");
    assert_eq!(comments[1]["content"], "nice post");
    assert_eq!(res.body["data"]["pagination"]["total"], 2);
    assert_eq!(res.body["data"]["pagination"]["total_pages"], 1);
}

#[tokio::test]
async fn test_comment_errors() {
    let app = TestApp::new().await;
    let token = app.user("peggy").await;
    let article = app.create_article(&token, "T", "C").await;

    let res = app
        .request(
            Method::POST,
            "/api/v1/articles/999/comments",
            Some(&token),
            Some(json!({ "content": "hello" })),
        )
        .await;
    assert_error(&res, StatusCode::NOT_FOUND, "NOT_FOUND");

    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/articles/{article}/comments"),
            Some(&token),
            Some(json!({ "content": "   " })),
        )
        .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "INVALID_INPUT");

    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/articles/{article}/comments"),
            None,
            Some(json!({ "content": "hello" })),
        )
        .await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let res = app
        .request(Method::DELETE, "/api/v1/comments/x", Some(&token), None)
        .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "INVALID_INPUT");
    assert_eq!(res.body["message"], "invalid comment id");

    let res = app
        .request(Method::DELETE, "/api/v1/comments/555", Some(&token), None)
        .await;
    assert_error(&res, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_listing_comments_of_missing_article_is_not_found() {
    let app = TestApp::new().await;
    let res = app.get("/api/v1/articles/31337/comments").await;
    assert_error(&res, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_comment_deletion_permissions() {
    let app = TestApp::new().await;
    let article_author = app.user("quinn").await;
    let commenter = app.user("rupert").await;
    let stranger = app.user("sybil").await;
    let article = app.create_article(&article_author, "T", "C").await;

    let first = app.create_comment(&commenter, article, "one").await;
    let second = app.create_comment(&commenter, article, "two").await;
    let third = app.create_comment(&commenter, article, "three").await;

    // an unrelated user is refused
    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/comments/{first}"),
            Some(&stranger),
            None,
        )
        .await;
    assert_error(&res, StatusCode::FORBIDDEN, "FORBIDDEN");

    // the comment's author may delete
    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/comments/{first}"),
            Some(&commenter),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "deleted");

    // so may the article's author
    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/comments/{second}"),
            Some(&article_author),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let storage = &app.state.storage;
    assert!(storage.find_comment(first).await.unwrap().is_none());
    assert!(storage.find_comment(second).await.unwrap().is_none());
    assert!(storage.find_comment(third).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_article_removes_its_comments() {
    let app = TestApp::new().await;
    let token = app.user("trent").await;
    let article = app.create_article(&token, "T", "C").await;
    let comment = app.create_comment(&token, article, "bye").await;

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/articles/{article}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let storage = &app.state.storage;
    assert!(storage.find_comment(comment).await.unwrap().is_none());
    assert_eq!(storage.count_comments(article).await.unwrap(), 0);

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/comments/{comment}"),
            Some(&token),
            None,
        )
        .await;
    assert_error(&res, StatusCode::NOT_FOUND, "NOT_FOUND");
}
