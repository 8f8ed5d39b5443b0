// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality of the blog API server.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthService, DefaultAuth};
use crate::config::Settings;
use crate::error::AppResult;
use crate::storage::{SqlStorage, Storage};

pub use router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential service
    pub auth: Arc<dyn AuthService>,
    /// Storage backend
    pub storage: Arc<dyn Storage>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state
    pub fn new(auth: Arc<dyn AuthService>, storage: Arc<dyn Storage>, settings: Settings) -> Self {
        Self {
            auth,
            storage,
            settings: Arc::new(settings),
        }
    }

    /// Open and migrate the configured database and build the default
    /// credential service
    pub async fn from_settings(settings: Settings) -> AppResult<Self> {
        let storage = SqlStorage::connect(&settings).await?;
        storage.migrate().await?;
        let auth = DefaultAuth::from_settings(&settings);
        Ok(Self::new(Arc::new(auth), Arc::new(storage), settings))
    }
}
