//! In-memory session store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use wardrobe_core::error::AppError;
use wardrobe_core::result::AppResult;
use wardrobe_entity::session::{CreateSession, Session, SessionStatus};

use crate::store::SessionStore;

/// In-memory session store using a Tokio mutex for thread safety.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    /// Rows in insertion order.
    rows: Arc<Mutex<Vec<Session>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed session row, e.g. to seed historical data.
    pub async fn insert(&self, session: Session) {
        self.rows.lock().await.push(session);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Session>> {
        let rows = self.rows.lock().await;
        let mut matching: Vec<Session> = rows
            .iter()
            .rev()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn list_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Session>> {
        let all = self.list_by_owner(owner_id).await?;
        Ok(all.into_iter().filter(|s| s.is_active()).collect())
    }

    async fn count_active_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|s| s.owner_id == owner_id && s.is_active())
            .count() as i64)
    }

    async fn count_created_since(&self, owner_id: Uuid, since: DateTime<Utc>) -> AppResult<i64> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|s| s.owner_id == owner_id && s.created_at >= since)
            .count() as i64)
    }

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Option<Session>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|s| s.owner_id == owner_id && s.id == session_id)
            .cloned())
    }

    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            status: SessionStatus::Pending,
            metadata: data.metadata.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().await.push(session.clone());
        Ok(session)
    }

    async fn update_status(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<Session> {
        let mut rows = self.rows.lock().await;
        let session = rows
            .iter_mut()
            .find(|s| s.owner_id == owner_id && s.id == session_id)
            .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))?;

        session.status = status;
        if metadata.is_some() {
            session.metadata = metadata;
        }
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    async fn mark_completed(&self, owner_id: Uuid, exclude: Option<Uuid>) -> AppResult<u64> {
        let mut rows = self.rows.lock().await;
        let now = Utc::now();
        let mut transitioned = 0u64;

        for session in rows.iter_mut() {
            if session.owner_id != owner_id || !session.is_active() {
                continue;
            }
            if exclude.is_some_and(|id| id == session.id) {
                continue;
            }
            session.status = SessionStatus::Completed;
            session.updated_at = now;
            transitioned += 1;
        }

        Ok(transitioned)
    }

    async fn complete_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut rows = self.rows.lock().await;
        let now = Utc::now();
        let mut transitioned = 0u64;

        for session in rows.iter_mut() {
            if session.is_active() && session.updated_at < cutoff {
                session.status = SessionStatus::Completed;
                session.updated_at = now;
                transitioned += 1;
            }
        }

        Ok(transitioned)
    }

    async fn delete_all_for_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|s| s.owner_id != owner_id);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_for(owner_id: Uuid) -> CreateSession {
        CreateSession {
            owner_id,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        let session = store.create(&create_for(owner)).await.unwrap();
        assert_eq!(session.status, SessionStatus::Pending);
        assert_eq!(session.owner_id, owner);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        let first = store.create(&create_for(owner)).await.unwrap();
        let second = store.create(&create_for(owner)).await.unwrap();

        let listed = store.list_by_owner(owner).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_mark_completed_empties_actives() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        store.create(&create_for(owner)).await.unwrap();
        store.create(&create_for(owner)).await.unwrap();

        let transitioned = store.mark_completed(owner, None).await.unwrap();
        assert_eq!(transitioned, 2);
        assert!(store.list_active_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_completed_respects_exclusion() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        store.create(&create_for(owner)).await.unwrap();
        let kept = store.create(&create_for(owner)).await.unwrap();

        let transitioned = store.mark_completed(owner, Some(kept.id)).await.unwrap();
        assert_eq!(transitioned, 1);

        let active = store.list_active_by_owner(owner).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_mark_completed_preserves_created_at() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        let session = store.create(&create_for(owner)).await.unwrap();

        store.mark_completed(owner, None).await.unwrap();
        let reloaded = store.find_for_owner(owner, session.id).await.unwrap().unwrap();
        assert_eq!(reloaded.created_at, session.created_at);
        assert_eq!(reloaded.status, SessionStatus::Completed);
    }

    #[tokio::test]
    async fn test_mark_completed_is_owner_scoped() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.create(&create_for(owner)).await.unwrap();
        store.create(&create_for(other)).await.unwrap();

        store.mark_completed(owner, None).await.unwrap();
        assert_eq!(store.count_active_by_owner(other).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_for_owner_hides_foreign_rows() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        let session = store.create(&create_for(owner)).await.unwrap();

        let foreign = store
            .find_for_owner(Uuid::new_v4(), session.id)
            .await
            .unwrap();
        assert!(foreign.is_none());
    }

    #[tokio::test]
    async fn test_complete_stale_only_touches_old_rows() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        let old = Utc::now() - chrono::Duration::hours(2);
        store
            .insert(Session {
                id: Uuid::new_v4(),
                owner_id: owner,
                status: SessionStatus::Processing,
                metadata: None,
                created_at: old,
                updated_at: old,
            })
            .await;
        store.create(&create_for(owner)).await.unwrap();

        let cutoff = Utc::now() - chrono::Duration::minutes(30);
        let transitioned = store.complete_stale(cutoff).await.unwrap();
        assert_eq!(transitioned, 1);
        assert_eq!(store.count_active_by_owner(owner).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_for_owner() {
        let store = MemorySessionStore::new();
        let owner = Uuid::new_v4();
        store.create(&create_for(owner)).await.unwrap();
        store.create(&create_for(owner)).await.unwrap();

        let deleted = store.delete_all_for_owner(owner).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(store.list_by_owner(owner).await.unwrap().is_empty());
    }
}
