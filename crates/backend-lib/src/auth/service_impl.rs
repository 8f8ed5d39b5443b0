use async_trait::async_trait;
use blog_common::Id;

use crate::auth::{password, AuthService, TokenService};
use crate::config::Settings;
use crate::error::AppResult;

/// scrypt + HS256 implementation of [`AuthService`]
pub struct DefaultAuth {
    tokens: TokenService,
    password_cost: u8,
}

impl DefaultAuth {
    pub fn new(tokens: TokenService, password_cost: u8) -> Self {
        Self {
            tokens,
            password_cost,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            TokenService::new(&settings.jwt_secret, settings.token_ttl_hours),
            settings.password_cost,
        )
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn hash_password(&self, plain: &str) -> AppResult<String> {
        let plain = plain.to_owned();
        let cost = self.password_cost;
        tokio::task::spawn_blocking(move || password::hash_password(&plain, cost)).await?
    }

    async fn verify_password(&self, hash: &str, plain: &str) -> AppResult<bool> {
        let hash = hash.to_owned();
        let plain = plain.to_owned();
        Ok(tokio::task::spawn_blocking(move || password::verify_password(&hash, &plain)).await?)
    }

    fn issue_token(&self, user_id: Id) -> AppResult<String> {
        self.tokens.issue(user_id)
    }

    fn validate_token(&self, token: &str) -> AppResult<Id> {
        Ok(self.tokens.validate(token)?.user_id)
    }
}
