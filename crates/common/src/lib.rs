// ================
// crates/common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between blog clients and the server.
//! This module defines the JSON envelope, request bodies and the public
//! views of users, articles and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identity shared by every entity
pub type Id = i64;

/// Machine-readable error classification carried in failed envelopes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalError,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Uniform response envelope returned by every endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying only data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            error_code: None,
            data: Some(data),
        }
    }

    /// Successful envelope carrying a message and data
    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error_code: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful envelope with a message and no data
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error_code: None,
            data: None,
        }
    }

    /// Failed envelope
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error_code: Some(code),
            data: None,
        }
    }
}

/// Pagination metadata attached to list responses
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Build metadata for an already-normalized page and limit.
    ///
    /// `total_pages` is the ceiling of `total / limit`; zero rows yield zero pages.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            let whole = total / limit;
            if total % limit == 0 {
                whole
            } else {
                whole + 1
            }
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Article with its author eagerly attached
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub author_id: Id,
    pub author: Option<UserView>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment with its author eagerly attached
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentView {
    pub id: Id,
    pub content: String,
    pub article_id: Id,
    pub author_id: Id,
    pub author: Option<UserView>,
    pub created_at: DateTime<Utc>,
}

/// `data` of register and login responses
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthPayload {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

/// `data` of the article listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleList {
    pub articles: Vec<ArticleView>,
    pub pagination: Pagination,
}

/// `data` of the comment listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentList {
    pub comments: Vec<CommentView>,
    pub pagination: Pagination,
}

/// Body of `POST /auth/register`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /auth/login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /users/me`. Empty strings leave the field unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Body of `POST /articles`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `PUT /articles/:id`. Empty strings leave the field unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `POST /articles/:id/comments`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
}

/// Treat an absent or empty optional field as "leave unchanged"
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
