//! Clothing item repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wardrobe_core::error::{AppError, ErrorKind};
use wardrobe_core::result::AppResult;
use wardrobe_entity::item::{ClothingItem, CreateClothingItem};

use crate::store::ItemStore;

/// PostgreSQL-backed clothing item store.
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    /// Create a new item store on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ClothingItem>> {
        sqlx::query_as::<_, ClothingItem>(
            "SELECT * FROM clothing_items WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list items", e))
    }

    async fn count_active_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clothing_items WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to count items", e))?;
        Ok(count)
    }

    async fn create(&self, data: &CreateClothingItem) -> AppResult<ClothingItem> {
        sqlx::query_as::<_, ClothingItem>(
            "INSERT INTO clothing_items (owner_id, label, category, attributes) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.label)
        .bind(&data.category)
        .bind(&data.attributes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to create item", e))
    }

    async fn soft_delete(&self, owner_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE clothing_items SET deleted_at = NOW() \
             WHERE owner_id = $1 AND id = $2 AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .bind(item_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete item", e))?;

        Ok(result.rows_affected() > 0)
    }
}
