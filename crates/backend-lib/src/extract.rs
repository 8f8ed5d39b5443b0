// ============================
// crates/backend-lib/src/extract.rs
// ============================
//! Request extractors that report failures through the JSON envelope.
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use blog_common::Id;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Json<T>` whose rejection is an `INVALID_INPUT` envelope instead of
/// axum's plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "malformed request body");
    AppError::InvalidInput(format!("invalid request body: {}", rejection.body_text()))
}

/// Parse a numeric path segment such as `/articles/{id}`
pub fn parse_id(raw: &str, what: &str) -> Result<Id, AppError> {
    raw.trim()
        .parse::<Id>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid {what} id")))
}
