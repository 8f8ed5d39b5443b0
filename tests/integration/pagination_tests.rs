// ====================================
// tests/integration/pagination_tests.rs
// ====================================
//! Page and limit handling of list endpoints
use axum::http::StatusCode;
use serde_json::Value;

use crate::test_utils::TestApp;

async fn seeded(count: usize) -> TestApp {
    let app = TestApp::new().await;
    let token = app.user("uma").await;
    for i in 0..count {
        app.create_article(&token, &format!("article {i}"), "body").await;
    }
    app
}

fn page_len(body: &Value) -> usize {
    body["data"]["articles"].as_array().unwrap().len()
}

#[tokio::test]
async fn test_25_articles_over_three_pages() {
    let app = seeded(25).await;

    let mut seen = Vec::new();
    for (page, expected) in [(1, 10), (2, 10), (3, 5)] {
        let res = app
            .get(&format!("/api/v1/articles?page={page}&limit=10"))
            .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(page_len(&res.body), expected, "page {page}");

        let meta = &res.body["data"]["pagination"];
        assert_eq!(meta["page"], page);
        assert_eq!(meta["limit"], 10);
        assert_eq!(meta["total"], 25);
        assert_eq!(meta["total_pages"], 3);

        for article in res.body["data"]["articles"].as_array().unwrap() {
            seen.push(article["id"].as_i64().unwrap());
        }
    }

    // newest first, no overlap between pages
    let mut sorted = seen.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(seen, sorted);
    sorted.dedup();
    assert_eq!(sorted.len(), 25);

    let res = app.get("/api/v1/articles?page=4&limit=10").await;
    assert_eq!(page_len(&res.body), 0);
}

#[tokio::test]
async fn test_out_of_range_limit_falls_back_to_ten() {
    let app = seeded(25).await;

    for limit in ["0", "150", "-5", "abc"] {
        let res = app
            .get(&format!("/api/v1/articles?limit={limit}"))
            .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(page_len(&res.body), 10, "limit={limit}");
        assert_eq!(res.body["data"]["pagination"]["limit"], 10);
    }

    let res = app.get("/api/v1/articles?page=0").await;
    assert_eq!(res.body["data"]["pagination"]["page"], 1);

    let res = app.get("/api/v1/articles?limit=100").await;
    assert_eq!(page_len(&res.body), 25);
    assert_eq!(res.body["data"]["pagination"]["total_pages"], 1);
}

#[tokio::test]
async fn test_exact_multiple_total_pages() {
    let app = seeded(20).await;
    let res = app.get("/api/v1/articles?limit=10").await;
    assert_eq!(res.body["data"]["pagination"]["total_pages"], 2);

    let empty = TestApp::new().await;
    let res = empty.get("/api/v1/articles").await;
    assert_eq!(res.body["data"]["pagination"]["total"], 0);
    assert_eq!(res.body["data"]["pagination"]["total_pages"], 0);
}

#[tokio::test]
async fn test_bad_parameter_only_resets_itself() {
    let app = seeded(5).await;

    let res = app.get("/api/v1/articles?limit=2&page=2&page=2").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(page_len(&res.body), 2);
    assert_eq!(res.body["data"]["pagination"]["limit"], 2);
    assert_eq!(res.body["data"]["pagination"]["page"], 2);
    assert_eq!(res.body["data"]["pagination"]["total_pages"], 3);

    let res = app.get("/api/v1/articles?limit=2&page=abc").await;
    assert_eq!(res.body["data"]["pagination"]["limit"], 2);
    assert_eq!(res.body["data"]["pagination"]["page"], 1);
}
