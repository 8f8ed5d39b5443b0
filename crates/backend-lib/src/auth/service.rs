// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! The `AuthService` trait handlers use for every credential operation.
use async_trait::async_trait;
use blog_common::Id;

use crate::error::AppResult;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// One-way salted hash of a password
    async fn hash_password(&self, plain: &str) -> AppResult<String>;
    /// Check a password against a stored hash
    async fn verify_password(&self, hash: &str, plain: &str) -> AppResult<bool>;
    /// Issue a signed token for a user
    fn issue_token(&self, user_id: Id) -> AppResult<String>;
    /// Resolve a token to the user id it was issued for
    fn validate_token(&self, token: &str) -> AppResult<Id>;
}
