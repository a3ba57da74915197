//! Quota evaluation — usage counting against tier ceilings.
//!
//! Usage is always recomputed from the stores; evaluations are never cached,
//! so there is no staleness to invalidate.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use wardrobe_core::config::tiers::{TierLimits, TierLimitsConfig};
use wardrobe_core::error::AppError;
use wardrobe_core::result::AppResult;
use wardrobe_core::types::quota::{QuotaDecision, ResourceKind};
use wardrobe_database::store::{ItemStore, ProfileStore, SessionStore};
use wardrobe_entity::profile::Tier;

/// Computes current usage per resource kind and evaluates it against the
/// owner's tier limits.
#[derive(Clone)]
pub struct QuotaEngine {
    sessions: Arc<dyn SessionStore>,
    items: Arc<dyn ItemStore>,
    profiles: Arc<dyn ProfileStore>,
    tiers: TierLimitsConfig,
}

impl std::fmt::Debug for QuotaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaEngine")
            .field("tiers", &self.tiers)
            .finish()
    }
}

impl QuotaEngine {
    /// Creates a new quota engine.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        items: Arc<dyn ItemStore>,
        profiles: Arc<dyn ProfileStore>,
        tiers: TierLimitsConfig,
    ) -> Self {
        Self {
            sessions,
            items,
            profiles,
            tiers,
        }
    }

    /// Evaluates current usage of a resource kind against the owner's tier.
    ///
    /// Fails closed: a missing profile or a store failure aborts the request
    /// instead of permitting unlimited usage. The boundary is exclusive —
    /// `current_usage == limit` is not allowed.
    pub async fn evaluate(
        &self,
        owner_id: Uuid,
        resource: ResourceKind,
    ) -> AppResult<QuotaDecision> {
        let profile = self
            .profiles
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No profile for owner {owner_id}")))?;

        let limit = self.limits_for(profile.tier).limit_for(resource) as i64;

        let current_usage = match resource {
            ResourceKind::ClothingItems => self.items.count_active_by_owner(owner_id).await?,
            ResourceKind::TryOnsPerMonth => {
                self.sessions
                    .count_created_since(owner_id, month_start(Utc::now()))
                    .await?
            }
            ResourceKind::ConcurrentSessions => {
                self.sessions.count_active_by_owner(owner_id).await?
            }
        };

        Ok(QuotaDecision::evaluate(resource, current_usage, limit))
    }

    /// Resolves the configured limits for a tier.
    fn limits_for(&self, tier: Tier) -> &TierLimits {
        match tier {
            Tier::Free => &self.tiers.free,
            Tier::Premium => &self.tiers.premium,
            Tier::Staff => &self.tiers.staff,
        }
    }
}

/// Builds the client-visible rejection for a denied quota decision.
///
/// Carries usage, limit, and remaining so the caller can explain why.
pub fn quota_rejection(decision: QuotaDecision) -> AppError {
    let reason = format!(
        "{} quota exceeded ({}/{})",
        decision.resource, decision.current_usage, decision.limit
    );
    AppError::quota(reason.clone()).with_details(serde_json::json!({
        "allowed": false,
        "reason": reason,
        "resource": decision.resource,
        "current_usage": decision.current_usage,
        "limit": decision.limit,
        "remaining": decision.remaining,
    }))
}

/// The first instant of the calendar month containing `now`, in UTC.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .unwrap_or(now)
}
