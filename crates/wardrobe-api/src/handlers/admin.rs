//! Staff-only maintenance handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use wardrobe_core::error::AppError;
use wardrobe_database::store::ProfileStore;

use crate::dto::response::{ApiResponse, PurgeResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// DELETE /api/admin/owners/{owner_id}/sessions
///
/// Deletes every session row for the given owner. Destructive; requires the
/// caller's tier to be staff.
pub async fn purge_owner_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PurgeResponse>>, ApiError> {
    require_staff(&state, auth.owner_id).await?;

    let deleted = state.lifecycle.purge_owner(owner_id).await?;
    Ok(Json(ApiResponse::ok(PurgeResponse { deleted })))
}

/// Rejects callers whose tier is not staff.
async fn require_staff(state: &AppState, caller_id: Uuid) -> Result<(), AppError> {
    let profile = state
        .profiles
        .find_by_owner(caller_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No profile for owner {caller_id}")))?;

    if !profile.tier.is_staff() {
        return Err(AppError::forbidden("Staff tier required"));
    }
    Ok(())
}
