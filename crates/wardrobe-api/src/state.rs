//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use wardrobe_auth::JwtDecoder;
use wardrobe_core::config::AppConfig;
use wardrobe_database::store::{ProfileStore, SessionStore};
use wardrobe_service::{ItemService, QuotaEngine, SessionLifecycleManager};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session persistence (reads go straight to the store).
    pub sessions: Arc<dyn SessionStore>,
    /// Owner profiles, for tier checks.
    pub profiles: Arc<dyn ProfileStore>,
    /// Bearer token verifier.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Quota evaluation.
    pub quota: Arc<QuotaEngine>,
    /// Session admission and lifecycle.
    pub lifecycle: Arc<SessionLifecycleManager>,
    /// Clothing item management.
    pub item_service: Arc<ItemService>,
    /// Process start time, for the health endpoint.
    pub started_at: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}
