//! Wardrobe Server — session & quota bookkeeping service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use wardrobe_core::config::AppConfig;
use wardrobe_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("WARDROBE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Wardrobe v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = wardrobe_database::DatabasePool::connect(&config.database).await?;
    wardrobe_database::migration::run_migrations(db.pool()).await?;
    let pool = db.into_pool();

    // ── Step 2: Stores ───────────────────────────────────────────
    let sessions: Arc<dyn wardrobe_database::SessionStore> = Arc::new(
        wardrobe_database::repositories::PgSessionStore::new(pool.clone()),
    );
    let items: Arc<dyn wardrobe_database::ItemStore> = Arc::new(
        wardrobe_database::repositories::PgItemStore::new(pool.clone()),
    );
    let profiles: Arc<dyn wardrobe_database::ProfileStore> = Arc::new(
        wardrobe_database::repositories::PgProfileStore::new(pool.clone()),
    );

    // ── Step 3: Cache ────────────────────────────────────────────
    let cache: Arc<dyn wardrobe_core::traits::CacheProvider> =
        Arc::new(wardrobe_cache::MemoryCacheProvider::new(&config.cache));

    // ── Step 4: Auth ─────────────────────────────────────────────
    let jwt_decoder = Arc::new(wardrobe_auth::JwtDecoder::new(&config.auth));

    // ── Step 5: Services ─────────────────────────────────────────
    let quota = Arc::new(wardrobe_service::QuotaEngine::new(
        Arc::clone(&sessions),
        Arc::clone(&items),
        Arc::clone(&profiles),
        config.tiers.clone(),
    ));
    let lifecycle = Arc::new(wardrobe_service::SessionLifecycleManager::new(
        Arc::clone(&sessions),
        Arc::clone(&quota),
        config.session.clone(),
    ));
    let item_service = Arc::new(wardrobe_service::ItemService::new(
        Arc::clone(&items),
        Arc::clone(&quota),
        Arc::clone(&cache),
        Duration::from_secs(config.cache.time_to_live_seconds),
    ));

    // ── Step 6: Shutdown channel + stale session sweeper ─────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if config.session.sweeper_enabled {
        let sweeper =
            wardrobe_service::StaleSessionSweeper::new(Arc::clone(&lifecycle), &config.session);
        let sweeper_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            sweeper.run(sweeper_cancel).await;
        });
        tracing::info!("Stale session sweeper started");
        Some(handle)
    } else {
        tracing::info!("Stale session sweeper disabled");
        None
    };

    // ── Step 7: Build and start HTTP server ──────────────────────
    let app_state = wardrobe_api::state::AppState {
        config: Arc::new(config.clone()),
        sessions,
        profiles,
        jwt_decoder,
        quota,
        lifecycle,
        item_service,
        started_at: Instant::now(),
    };

    let app = wardrobe_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Wardrobe server listening on {addr}");

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
    }

    tracing::info!("Wardrobe server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
