// ============================
// crates/backend-lib/src/handlers/comments.rs
// ============================
//! Comments attached to articles.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use blog_common::{ApiResponse, CommentList, CommentView, CreateCommentRequest};
use metrics::counter;

use super::{acting_user, articles::load_article, ApiResult};
use crate::{
    error::{AppError, AppResult},
    extract::{parse_id, ValidJson},
    metrics::{COMMENT_CREATED, COMMENT_DELETED},
    middleware::AuthUser,
    models::CommentWithAuthor,
    pagination::PageParams,
    policy::ensure_can_delete_comment,
    validation::validate_new_comment,
    AppState,
};

/// `GET /articles/{id}/comments?page&limit`
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    params: PageParams,
) -> ApiResult<CommentList> {
    let article_id = parse_id(&raw_id, "article")?;
    load_article(&state, article_id).await?;

    let total = state.storage.count_comments(article_id).await?;
    let comments = state
        .storage
        .list_comments(article_id, params)
        .await?
        .into_iter()
        .map(CommentView::from)
        .collect();

    Ok(Json(ApiResponse::ok(CommentList {
        comments,
        pagination: params.pagination(total),
    })))
}

/// `POST /articles/{id}/comments`
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> ApiResult<CommentView> {
    let article_id = parse_id(&raw_id, "article")?;
    let article = load_article(&state, article_id).await?;
    validate_new_comment(&req)?;
    let author = acting_user(&state, auth).await?;

    let comment = state
        .storage
        .create_comment(article.id, author.id, &req.content)
        .await?;

    tracing::debug!(comment_id = comment.id, article_id, "comment posted");
    counter!(COMMENT_CREATED).increment(1);

    let view = CommentWithAuthor {
        comment,
        author: (&author).into(),
    };
    Ok(Json(ApiResponse::ok_with_message("comment posted", view.into())))
}

/// `DELETE /comments/{id}`
///
/// Allowed for the comment's author and for the author of the article it
/// belongs to.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&raw_id, "comment")?;
    let comment = state
        .storage
        .find_comment(id)
        .await?
        .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

    let article = state.storage.find_article(comment.article_id).await?;
    ensure_can_delete_comment(auth.user_id, &comment, article.as_ref())?;

    state.storage.delete_comment(comment.id).await?;
    tracing::info!(comment_id = id, "comment deleted");
    counter!(COMMENT_DELETED).increment(1);

    Ok(Json(ApiResponse::message_only("deleted")))
}
