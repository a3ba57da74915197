//! Store traits — the seam between services and persistence.
//!
//! Every operation is scoped by owner id; no implementation may read or
//! write another owner's rows. Persistence failures surface as
//! `ErrorKind::Storage` errors carrying the underlying cause, and a failed
//! mutation means zero rows were changed. Callers decide whether to retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use wardrobe_core::result::AppResult;
use wardrobe_entity::item::{ClothingItem, CreateClothingItem};
use wardrobe_entity::profile::Profile;
use wardrobe_entity::session::{CreateSession, Session, SessionStatus};

/// Persistence for session rows.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// List all sessions for an owner, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Session>>;

    /// List sessions for an owner with a non-terminal status, newest first.
    async fn list_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Session>>;

    /// Count sessions for an owner with a non-terminal status.
    async fn count_active_by_owner(&self, owner_id: Uuid) -> AppResult<i64>;

    /// Count sessions for an owner created at or after `since`.
    async fn count_created_since(&self, owner_id: Uuid, since: DateTime<Utc>) -> AppResult<i64>;

    /// Find a session by id, provided it belongs to the owner.
    async fn find_for_owner(&self, owner_id: Uuid, session_id: Uuid)
    -> AppResult<Option<Session>>;

    /// Create a new session in status `pending`.
    async fn create(&self, data: &CreateSession) -> AppResult<Session>;

    /// Set a session's status (and optionally replace its metadata),
    /// provided it belongs to the owner. Bumps `updated_at`, never
    /// `created_at`.
    async fn update_status(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<Session>;

    /// Transition every active session for the owner to `completed`, except
    /// the one matching `exclude` if supplied. Returns the number of rows
    /// transitioned. Does not alter `created_at`.
    async fn mark_completed(&self, owner_id: Uuid, exclude: Option<Uuid>) -> AppResult<u64>;

    /// Force-complete active sessions (any owner) not updated since
    /// `cutoff`. Returns the number of rows transitioned.
    async fn complete_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Delete every session row for an owner. Destructive; maintenance
    /// flows only. Returns the number of rows deleted.
    async fn delete_all_for_owner(&self, owner_id: Uuid) -> AppResult<u64>;
}

/// Persistence for clothing item rows.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// List active (non-deleted) items for an owner, newest first.
    async fn list_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ClothingItem>>;

    /// Count active (non-deleted) items for an owner.
    async fn count_active_by_owner(&self, owner_id: Uuid) -> AppResult<i64>;

    /// Create a new item.
    async fn create(&self, data: &CreateClothingItem) -> AppResult<ClothingItem>;

    /// Soft-delete an item, provided it belongs to the owner and is still
    /// active. Returns `true` if a row was transitioned.
    async fn soft_delete(&self, owner_id: Uuid, item_id: Uuid) -> AppResult<bool>;
}

/// Read access to owner profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Find the profile for an owner.
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Profile>>;
}
