// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Registration and login.
use std::sync::Arc;

use axum::{extract::State, Json};
use blog_common::{ApiResponse, AuthPayload, LoginRequest, RegisterRequest};
use metrics::counter;

use super::ApiResult;
use crate::{
    error::AppError,
    extract::ValidJson,
    metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, USER_REGISTERED},
    storage::DUPLICATE_USER,
    validation::{validate_login, validate_register},
    AppState,
};

/// Returned for both an unknown email and a wrong password
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// `POST /auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> ApiResult<AuthPayload> {
    validate_register(&req)?;

    if state.storage.user_exists(&req.username, &req.email).await? {
        return Err(AppError::InvalidInput(DUPLICATE_USER.to_string()));
    }

    let password_hash = state.auth.hash_password(&req.password).await?;
    let user = state
        .storage
        .create_user(&req.username, &req.email, &password_hash)
        .await?;
    let token = state.auth.issue_token(user.id)?;

    tracing::info!(user_id = user.id, "user registered");
    counter!(USER_REGISTERED).increment(1);

    Ok(Json(ApiResponse::ok_with_message(
        "registered",
        AuthPayload { token, user: None },
    )))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<AuthPayload> {
    validate_login(&req)?;

    let Some(user) = state.storage.find_user_by_email(&req.email).await? else {
        return Err(login_failed());
    };
    if !state
        .auth
        .verify_password(&user.password_hash, &req.password)
        .await?
    {
        return Err(login_failed());
    }

    let token = state.auth.issue_token(user.id)?;
    tracing::debug!(user_id = user.id, "login succeeded");
    counter!(LOGIN_SUCCEEDED).increment(1);

    Ok(Json(ApiResponse::ok_with_message(
        "logged in",
        AuthPayload {
            token,
            user: Some(user.into()),
        },
    )))
}

fn login_failed() -> AppError {
    counter!(LOGIN_FAILED).increment(1);
    AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
}
