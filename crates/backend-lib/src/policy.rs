// ============================
// crates/backend-lib/src/policy.rs
// ============================
//! Ownership rules for mutating articles and comments.
use blog_common::Id;

use crate::error::{AppError, AppResult};
use crate::metrics::AUTHZ_DENIED;
use crate::models::{Article, Comment};

pub const PERMISSION_DENIED: &str = "permission denied";

/// Only the author may update or delete an article
pub fn can_modify_article(actor: Id, article: &Article) -> bool {
    article.author_id == actor
}

/// A comment may be deleted by its own author or by the author of the
/// article it belongs to. Without a parent article only the comment author
/// qualifies.
pub fn can_delete_comment(actor: Id, comment: &Comment, article: Option<&Article>) -> bool {
    comment.author_id == actor || article.is_some_and(|a| a.author_id == actor)
}

fn deny(actor: Id, resource: &'static str, id: Id) -> AppError {
    tracing::warn!(actor, resource, id, "permission denied");
    metrics::counter!(AUTHZ_DENIED).increment(1);
    AppError::Forbidden(PERMISSION_DENIED.to_string())
}

pub fn ensure_article_owner(actor: Id, article: &Article) -> AppResult<()> {
    if can_modify_article(actor, article) {
        Ok(())
    } else {
        Err(deny(actor, "article", article.id))
    }
}

pub fn ensure_can_delete_comment(
    actor: Id,
    comment: &Comment,
    article: Option<&Article>,
) -> AppResult<()> {
    if can_delete_comment(actor, comment, article) {
        Ok(())
    } else {
        Err(deny(actor, "comment", comment.id))
    }
}
