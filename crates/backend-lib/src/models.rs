// ============================
// crates/backend-lib/src/models.rs
// ============================
//! Persisted entities and their conversion into public views.
use blog_common::{ArticleView, CommentView, Id, UserView};
use chrono::{DateTime, Utc};

/// User row. Holds the password hash, so it is never serialized directly.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Article {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub author_id: Id,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: Id,
    pub content: String,
    pub article_id: Id,
    pub author_id: Id,
    pub created_at: DateTime<Utc>,
}

/// Author columns produced by a `LEFT JOIN users`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthorColumns {
    pub author_username: Option<String>,
    pub author_email: Option<String>,
    pub author_avatar: Option<String>,
    pub author_created_at: Option<DateTime<Utc>>,
    pub author_updated_at: Option<DateTime<Utc>>,
}

impl AuthorColumns {
    fn into_view(self, author_id: Id) -> Option<UserView> {
        Some(UserView {
            id: author_id,
            username: self.author_username?,
            email: self.author_email?,
            avatar: self.author_avatar,
            created_at: self.author_created_at?,
            updated_at: self.author_updated_at?,
        })
    }
}

impl From<&User> for AuthorColumns {
    fn from(user: &User) -> Self {
        Self {
            author_username: Some(user.username.clone()),
            author_email: Some(user.email.clone()),
            author_avatar: user.avatar.clone(),
            author_created_at: Some(user.created_at),
            author_updated_at: Some(user.updated_at),
        }
    }
}

/// Article with its author eagerly attached
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleWithAuthor {
    #[sqlx(flatten)]
    pub article: Article,
    #[sqlx(flatten)]
    pub author: AuthorColumns,
}

/// Comment with its author eagerly attached
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: Comment,
    #[sqlx(flatten)]
    pub author: AuthorColumns,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<ArticleWithAuthor> for ArticleView {
    fn from(row: ArticleWithAuthor) -> Self {
        let article = row.article;
        ArticleView {
            author: row.author.into_view(article.author_id),
            id: article.id,
            title: article.title,
            content: article.content,
            author_id: article.author_id,
            views: article.views,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

impl From<CommentWithAuthor> for CommentView {
    fn from(row: CommentWithAuthor) -> Self {
        let comment = row.comment;
        CommentView {
            author: row.author.into_view(comment.author_id),
            id: comment.id,
            content: comment.content,
            article_id: comment.article_id,
            author_id: comment.author_id,
            created_at: comment.created_at,
        }
    }
}
