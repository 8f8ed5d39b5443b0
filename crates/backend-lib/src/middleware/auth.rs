// crates/backend-lib/src/middleware/auth.rs
//! Bearer-token gate for protected routes.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use blog_common::Id;

use crate::{error::AppError, AppState};

/// Identity of the caller, inserted as a request extension once the
/// token has been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Id,
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid authorization header".to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("invalid authorization header".to_string()))?;
    Ok(token)
}

/// Reject the request unless it carries a valid token
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = {
        let token = bearer_token(request.headers())?;
        state.auth.validate_token(token)?
    };

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}
