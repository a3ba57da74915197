//! Clothing item service — quota-checked writes, cached reads.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use wardrobe_cache::keys;
use wardrobe_core::error::AppError;
use wardrobe_core::result::AppResult;
use wardrobe_core::traits::CacheProvider;
use wardrobe_core::types::quota::ResourceKind;
use wardrobe_database::store::ItemStore;
use wardrobe_entity::item::{ClothingItem, CreateClothingItem};

use crate::quota::{QuotaEngine, quota_rejection};

/// Manages an owner's clothing items.
///
/// Item lists are cached per owner with a TTL; every write invalidates the
/// owner's entry.
#[derive(Clone)]
pub struct ItemService {
    items: Arc<dyn ItemStore>,
    quota: Arc<QuotaEngine>,
    cache: Arc<dyn CacheProvider>,
    cache_ttl: Duration,
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(
        items: Arc<dyn ItemStore>,
        quota: Arc<QuotaEngine>,
        cache: Arc<dyn CacheProvider>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            items,
            quota,
            cache,
            cache_ttl,
        }
    }

    /// Lists the owner's active items, newest first.
    pub async fn list_items(&self, owner_id: Uuid) -> AppResult<Vec<ClothingItem>> {
        let key = keys::owner_items(owner_id);
        if let Some(cached) = self.cache.get_json::<Vec<ClothingItem>>(&key).await? {
            return Ok(cached);
        }

        let items = self.items.list_active_by_owner(owner_id).await?;
        self.cache.set_json(&key, &items, self.cache_ttl).await?;
        Ok(items)
    }

    /// Creates an item after checking the owner's item quota.
    pub async fn create_item(&self, data: CreateClothingItem) -> AppResult<ClothingItem> {
        let decision = self
            .quota
            .evaluate(data.owner_id, ResourceKind::ClothingItems)
            .await?;
        if !decision.allowed {
            return Err(quota_rejection(decision));
        }

        let item = self.items.create(&data).await?;
        self.cache.delete(&keys::owner_items(item.owner_id)).await?;

        info!(owner_id = %item.owner_id, item_id = %item.id, "Clothing item created");
        Ok(item)
    }

    /// Soft-deletes an item owned by the caller.
    pub async fn delete_item(&self, owner_id: Uuid, item_id: Uuid) -> AppResult<()> {
        if !self.items.soft_delete(owner_id, item_id).await? {
            return Err(AppError::not_found(format!("Item {item_id} not found")));
        }

        self.cache.delete(&keys::owner_items(owner_id)).await?;
        info!(owner_id = %owner_id, item_id = %item_id, "Clothing item deleted");
        Ok(())
    }
}
