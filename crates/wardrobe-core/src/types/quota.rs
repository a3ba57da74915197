//! Quota evaluation types.

use serde::{Deserialize, Serialize};

/// The resource kinds subject to tier quotas.
///
/// A closed enum: each variant has a counting rule in the quota engine and a
/// ceiling field in [`crate::config::tiers::TierLimits`], so adding a kind is
/// a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Active (non-deleted) clothing item rows.
    ClothingItems,
    /// Sessions created since the start of the current UTC calendar month.
    TryOnsPerMonth,
    /// Sessions currently in a non-terminal status.
    ConcurrentSessions,
}

impl ResourceKind {
    /// Return the kind as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClothingItems => "clothing_items",
            Self::TryOnsPerMonth => "try_ons_per_month",
            Self::ConcurrentSessions => "concurrent_sessions",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of evaluating one resource kind against the owner's tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDecision {
    /// The resource kind that was evaluated.
    pub resource: ResourceKind,
    /// Whether a new unit of the resource may be consumed.
    pub allowed: bool,
    /// Current usage count.
    pub current_usage: i64,
    /// The tier ceiling.
    pub limit: i64,
    /// How many more units may be consumed.
    pub remaining: i64,
}

impl QuotaDecision {
    /// Evaluate usage against a limit.
    ///
    /// The boundary is exclusive: `current_usage == limit` is not allowed.
    pub fn evaluate(resource: ResourceKind, current_usage: i64, limit: i64) -> Self {
        Self {
            resource,
            allowed: current_usage < limit,
            current_usage,
            limit,
            remaining: (limit - current_usage).max(0),
        }
    }
}
