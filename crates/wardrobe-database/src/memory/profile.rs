//! In-memory profile store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use wardrobe_core::result::AppResult;
use wardrobe_entity::profile::{Profile, Tier};

use crate::store::ProfileStore;

/// In-memory profile store using a Tokio mutex for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    rows: Arc<Mutex<HashMap<Uuid, Profile>>>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile for an owner.
    pub async fn upsert(&self, owner_id: Uuid, tier: Tier) {
        let now = Utc::now();
        self.rows.lock().await.insert(
            owner_id,
            Profile {
                owner_id,
                tier,
                created_at: now,
                updated_at: now,
            },
        );
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.rows.lock().await.get(&owner_id).cloned())
    }
}
