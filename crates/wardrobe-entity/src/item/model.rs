//! Clothing item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A clothing item in an owner's closet.
///
/// Items are soft-deleted: a row with `deleted_at` set no longer counts
/// toward the item quota but is kept for bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClothingItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// The owner this item belongs to.
    pub owner_id: Uuid,
    /// Display label.
    pub label: String,
    /// Category, e.g. "tops" or "shoes".
    pub category: Option<String>,
    /// Free-form attributes (JSON).
    pub attributes: Option<serde_json::Value>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was soft-deleted, if it was.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ClothingItem {
    /// Whether the item counts toward the item quota.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Data required to create a new clothing item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClothingItem {
    /// The owner this item belongs to.
    pub owner_id: Uuid,
    /// Display label.
    pub label: String,
    /// Category.
    pub category: Option<String>,
    /// Free-form attributes (JSON).
    pub attributes: Option<serde_json::Value>,
}
