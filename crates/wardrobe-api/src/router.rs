//! Route definitions for the Wardrobe HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(session_routes())
        .merge(quota_routes())
        .merge(item_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Session lifecycle endpoints
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(handlers::session::list_sessions))
        .route("/sessions", post(handlers::session::create_session))
        .route("/sessions/cleanup", post(handlers::session::cleanup_sessions))
        .route("/sessions/{id}", get(handlers::session::get_session))
        .route(
            "/sessions/{id}/status",
            put(handlers::session::update_session_status),
        )
}

/// Quota inspection endpoints
fn quota_routes() -> Router<AppState> {
    Router::new().route("/quota", get(handlers::quota::get_quota))
}

/// Clothing item endpoints
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(handlers::item::list_items))
        .route("/items", post(handlers::item::create_item))
        .route("/items/{id}", delete(handlers::item::delete_item))
}

/// Staff-only maintenance endpoints
fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/owners/{owner_id}/sessions",
        delete(handlers::admin::purge_owner_sessions),
    )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins = &state.config.server.allowed_origins;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    cors
}
