// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! The authenticated user's own profile.
use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use blog_common::{non_empty, ApiResponse, UpdateUserRequest, UserView};

use super::{acting_user, ApiResult};
use crate::{
    error::AppError, extract::ValidJson, middleware::AuthUser, storage::DUPLICATE_USER,
    validation::validate_user_update, AppState,
};

/// `GET /users/me`
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<UserView> {
    let user = acting_user(&state, auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// `PUT /users/me`
///
/// Empty or absent fields leave the stored value unchanged.
pub async fn update_current_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> ApiResult<UserView> {
    validate_user_update(&req)?;
    let mut user = acting_user(&state, auth).await?;

    if let Some(username) = non_empty(&req.username) {
        if username != user.username && state.storage.username_taken(username, user.id).await? {
            return Err(AppError::InvalidInput(DUPLICATE_USER.to_string()));
        }
        user.username = username.to_string();
    }
    if let Some(avatar) = non_empty(&req.avatar) {
        user.avatar = Some(avatar.to_string());
    }

    let user = state.storage.update_user(&user).await?;
    tracing::debug!(user_id = user.id, "profile updated");
    Ok(Json(ApiResponse::ok_with_message("updated", user.into())))
}
