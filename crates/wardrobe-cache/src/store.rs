//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use wardrobe_core::config::CacheConfig;
use wardrobe_core::result::AppResult;
use wardrobe_core::traits::CacheProvider;

/// In-memory cache provider using moka.
///
/// Entries carry their own deadline; the cache-level TTL from configuration
/// is an upper bound that lets moka reclaim memory for entries nobody reads
/// again.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, (String, Instant)>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.cache.get(key).await {
            Some((value, deadline)) if Instant::now() < deadline => Ok(Some(value)),
            Some(_) => {
                self.cache.invalidate(key).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        debug!(key, "Cache entry invalidated");
        Ok(())
    }
}
