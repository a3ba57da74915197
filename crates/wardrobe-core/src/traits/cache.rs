//! Cache provider trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A string-keyed cache with per-entry TTL and explicit invalidation.
///
/// Implementations are injected into the services that need them; nothing in
/// the application caches through hidden global state.
#[async_trait]
pub trait CacheProvider: Send + Sync + 'static {
    /// Fetch a value by key. Returns `None` on miss or expiry.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value under a key with the given TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Invalidate a key. A miss is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

impl dyn CacheProvider {
    /// Fetch and deserialize a JSON value.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON value.
    pub async fn set_json<T: serde::Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw, ttl).await
    }
}
