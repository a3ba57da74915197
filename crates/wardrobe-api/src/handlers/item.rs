//! Clothing item handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use wardrobe_core::error::AppError;
use wardrobe_entity::item::{ClothingItem, CreateClothingItem};

use crate::dto::request::CreateItemRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ClothingItem>>>, ApiError> {
    let items = state.item_service.list_items(auth.owner_id).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<ApiResponse<ClothingItem>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let item = state
        .item_service
        .create_item(CreateClothingItem {
            owner_id: auth.owner_id,
            label: req.label,
            category: req.category,
            attributes: req.attributes,
        })
        .await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.item_service.delete_item(auth.owner_id, item_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Item deleted".to_string(),
    })))
}
