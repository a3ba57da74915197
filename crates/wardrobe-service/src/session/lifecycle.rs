//! Session lifecycle manager — admission, cleanup, transitions.
//!
//! Admission policy: one active session per owner, enforced by force-closing
//! predecessors. Every admission first transitions the owner's active
//! sessions to `completed`, then returns the quota engine's verdict for
//! `concurrent_sessions`. Admission never answers `allowed` without a
//! successfully resolved tier.
//!
//! All admission paths for one owner are serialized through a per-owner
//! mutex held across cleanup, evaluation, and creation, so two concurrent
//! requests cannot both observe zero active sessions and both create one.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use wardrobe_core::config::SessionConfig;
use wardrobe_core::error::AppError;
use wardrobe_core::result::AppResult;
use wardrobe_core::types::quota::{QuotaDecision, ResourceKind};
use wardrobe_database::store::SessionStore;
use wardrobe_entity::session::{CreateSession, Session, SessionStatus};

use crate::quota::{QuotaEngine, quota_rejection};

/// The outcome of an admission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionResult {
    /// Whether a new session may start.
    pub allowed: bool,
    /// Why admission was denied, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Active sessions remaining after cleanup.
    pub active_session_count: i64,
    /// Sessions force-completed by this request's cleanup.
    pub cleaned: u64,
}

/// Orchestrates the "can a new unit of work start" decision.
#[derive(Clone)]
pub struct SessionLifecycleManager {
    sessions: Arc<dyn SessionStore>,
    quota: Arc<QuotaEngine>,
    config: SessionConfig,
    /// Per-owner admission locks.
    admission_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for SessionLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLifecycleManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionLifecycleManager {
    /// Creates a new lifecycle manager.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        quota: Arc<QuotaEngine>,
        config: SessionConfig,
    ) -> Self {
        Self {
            sessions,
            quota,
            config,
            admission_locks: Arc::new(DashMap::new()),
        }
    }

    /// Returns the admission lock for an owner, creating it on first use.
    fn owner_lock(&self, owner_id: Uuid) -> Arc<Mutex<()>> {
        self.admission_locks
            .entry(owner_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Decides whether a new session may start for the owner.
    ///
    /// Force-completes all of the owner's active sessions, then returns the
    /// quota engine's `concurrent_sessions` verdict.
    pub async fn request_admission(&self, owner_id: Uuid) -> AppResult<AdmissionResult> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock().await;
        let (admission, _) = self.admit_locked(owner_id).await?;
        Ok(admission)
    }

    /// Runs admission and, if allowed, creates the new `pending` session.
    ///
    /// The owner lock is held across cleanup, both quota evaluations, and
    /// the create, so concurrent calls are fully serialized.
    pub async fn begin(
        &self,
        owner_id: Uuid,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<Session> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock().await;

        let (admission, decision) = self.admit_locked(owner_id).await?;
        if !admission.allowed {
            return Err(quota_rejection(decision));
        }

        let monthly = self
            .quota
            .evaluate(owner_id, ResourceKind::TryOnsPerMonth)
            .await?;
        if !monthly.allowed {
            return Err(quota_rejection(monthly));
        }

        let session = self
            .sessions
            .create(&CreateSession { owner_id, metadata })
            .await?;

        info!(
            owner_id = %owner_id,
            session_id = %session.id,
            cleaned = admission.cleaned,
            "Session admitted"
        );

        Ok(session)
    }

    /// Force-completes all of the owner's active sessions.
    ///
    /// Returns the number of sessions transitioned.
    pub async fn cleanup(&self, owner_id: Uuid) -> AppResult<u64> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock().await;

        let cleaned = self.sessions.mark_completed(owner_id, None).await?;
        if cleaned > 0 {
            info!(owner_id = %owner_id, cleaned, "Cleaned up active sessions");
        }
        Ok(cleaned)
    }

    /// Transitions a session to a new status.
    ///
    /// Legal transitions: pending → processing/completed/failed and
    /// processing → completed/failed. Terminal sessions are immutable.
    pub async fn transition(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<Session> {
        let session = self
            .sessions
            .find_for_owner(owner_id, session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))?;

        if !session.status.can_transition_to(status) {
            return Err(AppError::conflict(format!(
                "Cannot transition session from {} to {}",
                session.status, status
            )));
        }

        self.sessions
            .update_status(owner_id, session_id, status, metadata)
            .await
    }

    /// Force-completes active sessions (any owner) whose last update is
    /// older than the configured staleness threshold.
    pub async fn sweep_stale(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let cutoff = now - Duration::minutes(self.config.stale_after_minutes as i64);
        let swept = self.sessions.complete_stale(cutoff).await?;
        if swept > 0 {
            info!(swept, "Force-completed stale sessions");
        } else {
            debug!("No stale sessions found");
        }
        Ok(swept)
    }

    /// Deletes every session row for an owner. Maintenance flows only.
    pub async fn purge_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let lock = self.owner_lock(owner_id);
        let _guard = lock.lock().await;

        let deleted = self.sessions.delete_all_for_owner(owner_id).await?;
        info!(owner_id = %owner_id, deleted, "Purged all sessions for owner");
        Ok(deleted)
    }

    /// Cleanup + concurrent-session verdict, with the owner lock already
    /// held by the caller.
    async fn admit_locked(&self, owner_id: Uuid) -> AppResult<(AdmissionResult, QuotaDecision)> {
        let cleaned = self.sessions.mark_completed(owner_id, None).await?;
        if cleaned > 0 {
            debug!(owner_id = %owner_id, cleaned, "Force-closed predecessors before admission");
        }

        let decision = self
            .quota
            .evaluate(owner_id, ResourceKind::ConcurrentSessions)
            .await?;

        let reason = (!decision.allowed).then(|| {
            format!(
                "concurrent session limit reached ({}/{})",
                decision.current_usage, decision.limit
            )
        });

        Ok((
            AdmissionResult {
                allowed: decision.allowed,
                reason,
                active_session_count: decision.current_usage,
                cleaned,
            },
            decision,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_core::config::tiers::TierLimitsConfig;
    use wardrobe_core::error::ErrorKind;
    use wardrobe_database::memory::{MemoryItemStore, MemoryProfileStore, MemorySessionStore};
    use wardrobe_entity::profile::Tier;

    struct Fixture {
        sessions: Arc<MemorySessionStore>,
        profiles: Arc<MemoryProfileStore>,
        manager: SessionLifecycleManager,
    }

    fn fixture() -> Fixture {
        let sessions = Arc::new(MemorySessionStore::new());
        let items = Arc::new(MemoryItemStore::new());
        let profiles = Arc::new(MemoryProfileStore::new());
        let quota = Arc::new(QuotaEngine::new(
            sessions.clone(),
            items,
            profiles.clone(),
            TierLimitsConfig::default(),
        ));
        let manager =
            SessionLifecycleManager::new(sessions.clone(), quota, SessionConfig::default());
        Fixture {
            sessions,
            profiles,
            manager,
        }
    }

    async fn seed_active(f: &Fixture, owner: Uuid, status: SessionStatus) -> Session {
        let session = f
            .sessions
            .create(&CreateSession {
                owner_id: owner,
                metadata: None,
            })
            .await
            .unwrap();
        if status != SessionStatus::Pending {
            f.sessions
                .update_status(owner, session.id, status, None)
                .await
                .unwrap()
        } else {
            session
        }
    }

    #[tokio::test]
    async fn test_admission_is_idempotent() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        let first = f.manager.request_admission(owner).await.unwrap();
        let second = f.manager.request_admission(owner).await.unwrap();

        assert!(first.allowed);
        assert!(second.allowed);
        assert_eq!(first.active_session_count, 0);
        assert_eq!(second.active_session_count, 0);
    }

    #[tokio::test]
    async fn test_admission_force_closes_predecessors() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        seed_active(&f, owner, SessionStatus::Pending).await;
        seed_active(&f, owner, SessionStatus::Processing).await;

        let admission = f.manager.request_admission(owner).await.unwrap();
        assert!(admission.allowed);
        assert_eq!(admission.cleaned, 2);
        assert_eq!(admission.active_session_count, 0);
        assert!(f.sessions.list_active_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_counts_only_active_sessions() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        seed_active(&f, owner, SessionStatus::Pending).await;
        seed_active(&f, owner, SessionStatus::Pending).await;
        seed_active(&f, owner, SessionStatus::Completed).await;

        let cleaned = f.manager.cleanup(owner).await.unwrap();
        assert_eq!(cleaned, 2);
        assert!(f.sessions.list_active_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_begin_keeps_one_active_session() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        let first = f.manager.begin(owner, None).await.unwrap();
        let second = f.manager.begin(owner, None).await.unwrap();

        let active = f.sessions.list_active_by_owner(owner).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);

        let first_reloaded = f
            .sessions
            .find_for_owner(owner, first.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first_reloaded.status, SessionStatus::Completed);
    }

    #[tokio::test]
    async fn test_concurrent_begins_never_leave_two_active() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        let m1 = f.manager.clone();
        let m2 = f.manager.clone();
        let a = tokio::spawn(async move { m1.begin(owner, None).await });
        let b = tokio::spawn(async move { m2.begin(owner, None).await });

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let active = f.sessions.list_active_by_owner(owner).await.unwrap();
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn test_begin_fails_closed_without_profile() {
        let f = fixture();
        let err = f.manager.begin(Uuid::new_v4(), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_begin_rejects_when_monthly_quota_exhausted() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        // Free tier allows 30 try-ons per month; exhaust them as completed
        // rows so the concurrent check passes.
        for _ in 0..30 {
            seed_active(&f, owner, SessionStatus::Completed).await;
        }

        let err = f.manager.begin(owner, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Quota);
        let details = err.details.unwrap();
        assert_eq!(details["current_usage"], 30);
        assert_eq!(details["limit"], 30);
        assert_eq!(details["remaining"], 0);
    }

    #[tokio::test]
    async fn test_transition_pending_to_processing() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        let session = f.manager.begin(owner, None).await.unwrap();
        let updated = f
            .manager
            .transition(owner, session.id, SessionStatus::Processing, None)
            .await
            .unwrap();
        assert_eq!(updated.status, SessionStatus::Processing);
        assert_eq!(updated.created_at, session.created_at);
    }

    #[tokio::test]
    async fn test_transition_rejects_terminal_mutation() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        let session = seed_active(&f, owner, SessionStatus::Completed).await;
        let err = f
            .manager
            .transition(owner, session.id, SessionStatus::Processing, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_transition_hides_foreign_sessions() {
        let f = fixture();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;
        f.profiles.upsert(other, Tier::Free).await;

        let session = f.manager.begin(owner, None).await.unwrap();
        let err = f
            .manager
            .transition(other, session.id, SessionStatus::Processing, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_sweep_completes_only_stale_sessions() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        // Begin first: admission cleanup would otherwise force-close the
        // stale row before the sweeper ever sees it.
        let fresh = f.manager.begin(owner, None).await.unwrap();

        let old = Utc::now() - Duration::hours(2);
        f.sessions
            .insert(Session {
                id: Uuid::new_v4(),
                owner_id: owner,
                status: SessionStatus::Processing,
                metadata: None,
                created_at: old,
                updated_at: old,
            })
            .await;

        let swept = f.manager.sweep_stale(Utc::now()).await.unwrap();
        assert_eq!(swept, 1);

        let active = f.sessions.list_active_by_owner(owner).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, fresh.id);
    }

    #[tokio::test]
    async fn test_purge_owner_deletes_everything() {
        let f = fixture();
        let owner = Uuid::new_v4();
        f.profiles.upsert(owner, Tier::Free).await;

        f.manager.begin(owner, None).await.unwrap();
        f.manager.begin(owner, None).await.unwrap();

        let deleted = f.manager.purge_owner(owner).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(f.sessions.list_by_owner(owner).await.unwrap().is_empty());
    }
}
