// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! Resource handlers for the blog API.
//!
//! Each handler validates its input, applies the ownership rules from
//! [`crate::policy`], talks to [`crate::storage::Storage`] and wraps the
//! result in the uniform [`ApiResponse`] envelope.

pub mod articles;
pub mod auth;
pub mod comments;
pub mod users;

use axum::Json;
use blog_common::ApiResponse;

use crate::{
    error::{AppError, AppResult},
    middleware::AuthUser,
    models::User,
    AppState,
};

/// Return type shared by every handler
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;

/// Load the acting user, failing `NOT_FOUND` if the account is gone
pub(crate) async fn acting_user(state: &AppState, auth: AuthUser) -> AppResult<User> {
    state
        .storage
        .find_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}
