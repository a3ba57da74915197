//! Session handlers — list, create, inspect, transition, cleanup.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use wardrobe_core::error::AppError;
use wardrobe_database::store::SessionStore;
use wardrobe_entity::session::Session;

use crate::dto::request::{CreateSessionRequest, UpdateSessionStatusRequest};
use crate::dto::response::{ApiResponse, CleanupResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Session>>>, ApiError> {
    let sessions = state.sessions.list_by_owner(auth.owner_id).await?;
    Ok(Json(ApiResponse::ok(sessions)))
}

/// POST /api/sessions
///
/// Runs admission (force-closing the caller's active sessions) and creates
/// the new pending session. Quota rejections surface as 409 with the full
/// decision in the error details.
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<Session>>, ApiError> {
    let session = state.lifecycle.begin(auth.owner_id, req.metadata).await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Session>>, ApiError> {
    let session = state
        .sessions
        .find_for_owner(auth.owner_id, session_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))?;
    Ok(Json(ApiResponse::ok(session)))
}

/// PUT /api/sessions/{id}/status
pub async fn update_session_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<Uuid>,
    Json(req): Json<UpdateSessionStatusRequest>,
) -> Result<Json<ApiResponse<Session>>, ApiError> {
    let session = state
        .lifecycle
        .transition(auth.owner_id, session_id, req.status, req.metadata)
        .await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// POST /api/sessions/cleanup
pub async fn cleanup_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CleanupResponse>>, ApiError> {
    let cleaned = state.lifecycle.cleanup(auth.owner_id).await?;
    Ok(Json(ApiResponse::ok(CleanupResponse { cleaned })))
}
