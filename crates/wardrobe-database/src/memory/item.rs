//! In-memory clothing item store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use wardrobe_core::result::AppResult;
use wardrobe_entity::item::{ClothingItem, CreateClothingItem};

use crate::store::ItemStore;

/// In-memory clothing item store using a Tokio mutex for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryItemStore {
    /// Rows in insertion order.
    rows: Arc<Mutex<Vec<ClothingItem>>>,
}

impl MemoryItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed item row, e.g. to seed historical data.
    pub async fn insert(&self, item: ClothingItem) {
        self.rows.lock().await.push(item);
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ClothingItem>> {
        let rows = self.rows.lock().await;
        let mut matching: Vec<ClothingItem> = rows
            .iter()
            .rev()
            .filter(|i| i.owner_id == owner_id && i.is_active())
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn count_active_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|i| i.owner_id == owner_id && i.is_active())
            .count() as i64)
    }

    async fn create(&self, data: &CreateClothingItem) -> AppResult<ClothingItem> {
        let item = ClothingItem {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            label: data.label.clone(),
            category: data.category.clone(),
            attributes: data.attributes.clone(),
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.rows.lock().await.push(item.clone());
        Ok(item)
    }

    async fn soft_delete(&self, owner_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        match rows
            .iter_mut()
            .find(|i| i.owner_id == owner_id && i.id == item_id && i.is_active())
        {
            Some(item) => {
                item.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
