// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with a relational (sqlx/SQLite) implementation.
use std::str::FromStr;

use async_trait::async_trait;
use blog_common::Id;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{Article, ArticleWithAuthor, Comment, CommentWithAuthor, User};
use crate::pagination::PageParams;

/// Message for a username/email collision. Shared by the pre-insert check
/// and the unique-constraint fallback.
pub const DUPLICATE_USER: &str = "username or email already exists";

const USER_COLUMNS: &str = "id, username, email, password_hash, avatar, created_at, updated_at";
const ARTICLE_COLUMNS: &str = "id, title, content, author_id, views, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, content, article_id, author_id, created_at";

const ARTICLE_WITH_AUTHOR: &str = "SELECT a.id, a.title, a.content, a.author_id, a.views, \
     a.created_at, a.updated_at, \
     u.username AS author_username, u.email AS author_email, u.avatar AS author_avatar, \
     u.created_at AS author_created_at, u.updated_at AS author_updated_at \
     FROM articles a LEFT JOIN users u ON u.id = a.author_id";

const COMMENT_WITH_AUTHOR: &str = "SELECT c.id, c.content, c.article_id, c.author_id, c.created_at, \
     u.username AS author_username, u.email AS author_email, u.avatar AS author_avatar, \
     u.created_at AS author_created_at, u.updated_at AS author_updated_at \
     FROM comments c LEFT JOIN users u ON u.id = c.author_id";

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a user
    async fn create_user(&self, username: &str, email: &str, password_hash: &str)
        -> AppResult<User>;

    async fn find_user(&self, id: Id) -> AppResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether any user already has this username or this email
    async fn user_exists(&self, username: &str, email: &str) -> AppResult<bool>;

    /// Whether a user other than `except` owns this username
    async fn username_taken(&self, username: &str, except: Id) -> AppResult<bool>;

    /// Persist username, avatar and `updated_at`
    async fn update_user(&self, user: &User) -> AppResult<User>;

    async fn count_articles(&self) -> AppResult<i64>;

    /// One page of articles, newest first, authors attached
    async fn list_articles(&self, page: PageParams) -> AppResult<Vec<ArticleWithAuthor>>;

    async fn find_article(&self, id: Id) -> AppResult<Option<Article>>;

    async fn find_article_with_author(&self, id: Id) -> AppResult<Option<ArticleWithAuthor>>;

    async fn create_article(&self, author_id: Id, title: &str, content: &str) -> AppResult<Article>;

    /// Persist title, content and `updated_at`
    async fn update_article(&self, article: &Article) -> AppResult<Article>;

    /// Atomically add one view. Returns `false` if the article does not exist.
    async fn increment_views(&self, id: Id) -> AppResult<bool>;

    /// Delete an article together with its comments. Returns the number of
    /// comments removed.
    async fn delete_article(&self, id: Id) -> AppResult<u64>;

    async fn count_comments(&self, article_id: Id) -> AppResult<i64>;

    /// One page of an article's comments, newest first, authors attached
    async fn list_comments(
        &self,
        article_id: Id,
        page: PageParams,
    ) -> AppResult<Vec<CommentWithAuthor>>;

    async fn find_comment(&self, id: Id) -> AppResult<Option<Comment>>;

    async fn create_comment(&self, article_id: Id, author_id: Id, content: &str)
        -> AppResult<Comment>;

    async fn delete_comment(&self, id: Id) -> AppResult<()>;
}

/// Map a unique-constraint violation on `users` to a client error
fn map_user_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::InvalidInput(DUPLICATE_USER.to_string());
        }
    }
    AppError::Database(err)
}

/// sqlx implementation of the Storage trait
#[derive(Clone)]
pub struct SqlStorage {
    pool: SqlitePool,
}

impl SqlStorage {
    /// Open a pool for `settings.database_url`.
    ///
    /// An in-memory database lives only as long as its connection, so it is
    /// pinned to a single connection that never idles out.
    pub async fn connect(settings: &Settings) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?
            .foreign_keys(true)
            .create_if_missing(true);

        let in_memory = settings.database_url.contains(":memory:")
            || settings.database_url.contains("mode=memory");

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(settings.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::debug!(in_memory, "storage pool opened");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Storage for SqlStorage {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, avatar, created_at, updated_at) \
             VALUES (?, ?, ?, NULL, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_conflict)
    }

    async fn find_user(&self, id: Id) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_exists(&self, username: &str, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? OR email = ?)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn username_taken(&self, username: &str, except: Id) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? AND id <> ?)",
        )
        .bind(username)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn update_user(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET username = ?, avatar = ?, updated_at = ? WHERE id = ? \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.avatar)
        .bind(Utc::now())
        .bind(user.id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_conflict)
    }

    async fn count_articles(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn list_articles(&self, page: PageParams) -> AppResult<Vec<ArticleWithAuthor>> {
        let rows = sqlx::query_as::<_, ArticleWithAuthor>(&format!(
            "{ARTICLE_WITH_AUTHOR} ORDER BY a.created_at DESC, a.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_article(&self, id: Id) -> AppResult<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(article)
    }

    async fn find_article_with_author(&self, id: Id) -> AppResult<Option<ArticleWithAuthor>> {
        let row = sqlx::query_as::<_, ArticleWithAuthor>(&format!(
            "{ARTICLE_WITH_AUTHOR} WHERE a.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_article(&self, author_id: Id, title: &str, content: &str) -> AppResult<Article> {
        let now = Utc::now();
        let article = sqlx::query_as::<_, Article>(&format!(
            "INSERT INTO articles (title, content, author_id, views, created_at, updated_at) \
             VALUES (?, ?, ?, 0, ?, ?) RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(article)
    }

    async fn update_article(&self, article: &Article) -> AppResult<Article> {
        let updated = sqlx::query_as::<_, Article>(&format!(
            "UPDATE articles SET title = ?, content = ?, updated_at = ? WHERE id = ? \
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(&article.title)
        .bind(&article.content)
        .bind(Utc::now())
        .bind(article.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn increment_views(&self, id: Id) -> AppResult<bool> {
        let result = sqlx::query("UPDATE articles SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_article(&self, id: Id) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let comments = sqlx::query("DELETE FROM comments WHERE article_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(comments)
    }

    async fn count_comments(&self, article_id: Id) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE article_id = ?")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn list_comments(
        &self,
        article_id: Id,
        page: PageParams,
    ) -> AppResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentWithAuthor>(&format!(
            "{COMMENT_WITH_AUTHOR} WHERE c.article_id = ? \
             ORDER BY c.created_at DESC, c.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(article_id)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_comment(&self, id: Id) -> AppResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn create_comment(
        &self,
        article_id: Id,
        author_id: Id,
        content: &str,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (content, article_id, author_id, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(content)
        .bind(article_id)
        .bind(author_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn delete_comment(&self, id: Id) -> AppResult<()> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
