//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use wardrobe_api::state::AppState;
use wardrobe_auth::{JwtDecoder, JwtEncoder};
use wardrobe_cache::MemoryCacheProvider;
use wardrobe_core::config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, LoggingConfig, ServerConfig,
    SessionConfig, TierLimitsConfig,
};
use wardrobe_core::traits::CacheProvider;
use wardrobe_database::memory::{MemoryItemStore, MemoryProfileStore, MemorySessionStore};
use wardrobe_database::store::{ItemStore, ProfileStore, SessionStore};
use wardrobe_entity::profile::Tier;
use wardrobe_service::{ItemService, QuotaEngine, SessionLifecycleManager};

/// Test application context backed by in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Session store for direct seeding and assertions
    pub sessions: Arc<MemorySessionStore>,
    /// Item store for direct seeding
    pub items: Arc<MemoryItemStore>,
    /// Profile store for tier fixtures
    pub profiles: Arc<MemoryProfileStore>,
    /// Token minting for test callers
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application with empty stores.
    pub fn new() -> Self {
        let config = test_config();

        let sessions = Arc::new(MemorySessionStore::new());
        let items = Arc::new(MemoryItemStore::new());
        let profiles = Arc::new(MemoryProfileStore::new());

        let session_store: Arc<dyn SessionStore> = sessions.clone();
        let item_store: Arc<dyn ItemStore> = items.clone();
        let profile_store: Arc<dyn ProfileStore> = profiles.clone();

        let cache: Arc<dyn CacheProvider> =
            Arc::new(MemoryCacheProvider::new(&config.cache));

        let encoder = JwtEncoder::new(&config.auth);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let quota = Arc::new(QuotaEngine::new(
            Arc::clone(&session_store),
            Arc::clone(&item_store),
            Arc::clone(&profile_store),
            config.tiers.clone(),
        ));
        let lifecycle = Arc::new(SessionLifecycleManager::new(
            Arc::clone(&session_store),
            Arc::clone(&quota),
            config.session.clone(),
        ));
        let item_service = Arc::new(ItemService::new(
            Arc::clone(&item_store),
            Arc::clone(&quota),
            Arc::clone(&cache),
            Duration::from_secs(config.cache.time_to_live_seconds),
        ));

        let app_state = AppState {
            config: Arc::new(config),
            sessions: session_store,
            profiles: profile_store,
            jwt_decoder,
            quota,
            lifecycle,
            item_service,
            started_at: Instant::now(),
        };

        let router = wardrobe_api::router::build_router(app_state);

        Self {
            router,
            sessions,
            items,
            profiles,
            encoder,
        }
    }

    /// Create an owner with the given tier and return their ID.
    pub async fn create_owner(&self, tier: Tier) -> Uuid {
        let owner_id = Uuid::new_v4();
        self.profiles.upsert(owner_id, tier).await;
        owner_id
    }

    /// Mint a bearer token for an owner.
    pub fn token_for(&self, owner_id: Uuid) -> String {
        self.encoder.issue(owner_id).expect("Failed to issue token")
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Configuration for tests: in-memory everything, a fixed test secret, and
/// the default tier limits.
fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            allowed_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        cache: CacheConfig::default(),
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_access_ttl_minutes: 60,
        },
        session: SessionConfig::default(),
        tiers: TierLimitsConfig::default(),
        logging: LoggingConfig::default(),
    }
}
