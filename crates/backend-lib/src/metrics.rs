// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const USER_REGISTERED: &str = "user.registered";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const LOGIN_FAILED: &str = "login.failed";
pub const ARTICLE_CREATED: &str = "article.created";
pub const ARTICLE_DELETED: &str = "article.deleted";
pub const ARTICLE_VIEWED: &str = "article.viewed";
pub const COMMENT_CREATED: &str = "comment.created";
pub const COMMENT_DELETED: &str = "comment.deleted";
pub const AUTHZ_DENIED: &str = "authz.denied";
