//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use wardrobe_core::types::quota::ResourceKind;
use wardrobe_entity::session::SessionStatus;

/// Create session request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Free-form metadata to attach to the session.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Session status update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSessionStatusRequest {
    /// Target status.
    pub status: SessionStatus,
    /// Replacement metadata, if any.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Create clothing item request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    /// Display label.
    #[validate(length(min = 1, max = 120, message = "Label must be 1-120 characters"))]
    pub label: String,
    /// Category.
    pub category: Option<String>,
    /// Free-form attributes.
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
}

/// Query string for the quota endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaQuery {
    /// The resource kind to evaluate.
    pub resource: ResourceKind,
}
