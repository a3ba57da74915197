//! Quota handlers.

use axum::Json;
use axum::extract::{Query, State};

use wardrobe_core::types::quota::QuotaDecision;

use crate::dto::request::QuotaQuery;
use crate::error::ApiError;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/quota?resource=<kind>
pub async fn get_quota(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<QuotaQuery>,
) -> Result<Json<ApiResponse<QuotaDecision>>, ApiError> {
    let decision = state.quota.evaluate(auth.owner_id, query.resource).await?;
    Ok(Json(ApiResponse::ok(decision)))
}
