// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP routes of the blog API.
use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use blog_common::{ApiResponse, ErrorCode};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{articles, auth, comments, users};
use crate::middleware::require_auth;
use crate::AppState;

/// Create the application router
///
/// Public and token-protected routes are built separately and merged, so
/// a path such as `/articles/{id}` can be readable by anyone while its
/// `PUT` and `DELETE` require a bearer token.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{id}", get(articles::get_article))
        .route("/articles/{id}/comments", get(comments::list_comments));

    let protected = Router::new()
        .route(
            "/users/me",
            get(users::current_user).put(users::update_current_user),
        )
        .route("/articles", post(articles::create_article))
        .route(
            "/articles/{id}",
            delete(articles::delete_article).put(articles::update_article),
        )
        .route("/articles/{id}/comments", post(comments::create_comment))
        .route("/comments/{id}", delete(comments::delete_comment))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let api = public.merge(protected);
    let prefix = state.settings.api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(prefix, api)
    };

    let mut router = router
        .route("/health", get(health))
        .fallback(fallback)
        .with_state(state.clone());

    if state.settings.cors_allow_any {
        router = router.layer(CorsLayer::permissive());
    }
    router.layer(TraceLayer::new_for_http())
}

async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        success: true,
        message: None,
        error_code: None,
        data: None,
    })
}

async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(ErrorCode::NotFound, "route not found")),
    )
}
