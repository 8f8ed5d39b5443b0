// ============================
// crates/backend-lib/src/handlers/articles.rs
// ============================
//! Article listing, detail and authoring.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use blog_common::{
    non_empty, ApiResponse, ArticleList, ArticleView, CreateArticleRequest, Id,
    UpdateArticleRequest,
};
use metrics::counter;

use super::{acting_user, ApiResult};
use crate::{
    error::{AppError, AppResult},
    extract::{parse_id, ValidJson},
    metrics::{ARTICLE_CREATED, ARTICLE_DELETED, ARTICLE_VIEWED},
    middleware::AuthUser,
    models::{Article, ArticleWithAuthor},
    pagination::PageParams,
    policy::ensure_article_owner,
    validation::{validate_article_update, validate_new_article},
    AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("article not found".to_string())
}

pub(crate) async fn load_article(state: &AppState, id: Id) -> AppResult<Article> {
    state.storage.find_article(id).await?.ok_or_else(not_found)
}

async fn load_with_author(state: &AppState, id: Id) -> AppResult<ArticleView> {
    let row = state
        .storage
        .find_article_with_author(id)
        .await?
        .ok_or_else(not_found)?;
    Ok(row.into())
}

/// `GET /articles?page&limit`
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    params: PageParams,
) -> ApiResult<ArticleList> {

    let total = state.storage.count_articles().await?;
    let articles = state
        .storage
        .list_articles(params)
        .await?
        .into_iter()
        .map(ArticleView::from)
        .collect();

    Ok(Json(ApiResponse::ok(ArticleList {
        articles,
        pagination: params.pagination(total),
    })))
}

/// `GET /articles/{id}`. Every successful fetch counts as one view.
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<ArticleView> {
    let id = parse_id(&raw_id, "article")?;

    if !state.storage.increment_views(id).await? {
        return Err(not_found());
    }
    counter!(ARTICLE_VIEWED).increment(1);

    let article = load_with_author(&state, id).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// `POST /articles`
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ValidJson(req): ValidJson<CreateArticleRequest>,
) -> ApiResult<ArticleView> {
    validate_new_article(&req)?;
    let author = acting_user(&state, auth).await?;

    let article = state
        .storage
        .create_article(author.id, &req.title, &req.content)
        .await?;

    tracing::info!(article_id = article.id, author_id = author.id, "article created");
    counter!(ARTICLE_CREATED).increment(1);

    let view = ArticleWithAuthor {
        article,
        author: (&author).into(),
    };
    Ok(Json(ApiResponse::ok_with_message("created", view.into())))
}

/// `PUT /articles/{id}`
///
/// Only the author may edit. Empty or absent fields are left unchanged.
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
    ValidJson(req): ValidJson<UpdateArticleRequest>,
) -> ApiResult<ArticleView> {
    let id = parse_id(&raw_id, "article")?;
    let mut article = load_article(&state, id).await?;
    ensure_article_owner(auth.user_id, &article)?;
    validate_article_update(&req)?;

    if let Some(title) = non_empty(&req.title) {
        article.title = title.to_string();
    }
    if let Some(content) = non_empty(&req.content) {
        article.content = content.to_string();
    }
    state.storage.update_article(&article).await?;
    tracing::debug!(article_id = id, "article updated");

    let article = load_with_author(&state, id).await?;
    Ok(Json(ApiResponse::ok_with_message("updated", article)))
}

/// `DELETE /articles/{id}`. Comments on the article are removed with it.
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&raw_id, "article")?;
    let article = load_article(&state, id).await?;
    ensure_article_owner(auth.user_id, &article)?;

    let comments = state.storage.delete_article(article.id).await?;
    tracing::info!(article_id = id, comments, "article deleted");
    counter!(ARTICLE_DELETED).increment(1);

    Ok(Json(ApiResponse::message_only("deleted")))
}
