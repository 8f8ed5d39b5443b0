// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{ensure, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::password::{scrypt_params, MAX_PASSWORD_COST, MIN_PASSWORD_COST};

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "blog.toml";

/// Prefix of environment overrides, e.g. `BLOG_JWT_SECRET`
pub const ENV_PREFIX: &str = "BLOG_";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// sqlx connection string for the relational store
    pub database_url: String,
    /// Upper bound of pooled storage connections
    pub max_connections: u32,
    /// Symmetric secret used to sign session tokens
    pub jwt_secret: String,
    /// Lifetime of an issued token
    pub token_ttl_hours: i64,
    /// scrypt `log_n` used for new password hashes
    pub password_cost: u8,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Prefix every API route is nested under
    pub api_prefix: String,
    /// Allow cross-origin requests from any origin
    pub cors_allow_any: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite://blog.db?mode=rwc".to_string(),
            max_connections: 5,
            jwt_secret: "change-me-in-production".to_string(),
            token_ttl_hours: 24,
            password_cost: 15,
            log_level: "info".to_string(),
            api_prefix: "/api/v1".to_string(),
            cors_allow_any: true,
        }
    }
}

impl Settings {
    /// Layered sources: defaults, then `blog.toml`, then `BLOG_*` variables
    pub fn figment() -> Figment {
        Self::figment_with_file(CONFIG_FILE)
    }

    fn figment_with_file<P: AsRef<Path>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load settings from the default locations
    pub fn load() -> Result<Self> {
        let settings: Settings = Self::figment().extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings using an explicit TOML file in place of `blog.toml`
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        ensure!(path.exists(), "config file {} does not exist", path.display());
        let settings: Settings = Self::figment_with_file(path).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.jwt_secret.is_empty(), "jwt_secret must not be empty");
        ensure!(self.token_ttl_hours > 0, "token_ttl_hours must be positive");
        ensure!(self.max_connections > 0, "max_connections must be positive");
        ensure!(
            scrypt_params(self.password_cost).is_ok(),
            "password_cost {} is outside {MIN_PASSWORD_COST}..={MAX_PASSWORD_COST}",
            self.password_cost
        );
        ensure!(
            self.api_prefix.is_empty() || self.api_prefix.starts_with('/'),
            "api_prefix must start with '/'"
        );
        Ok(())
    }
}
