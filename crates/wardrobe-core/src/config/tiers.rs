//! Per-tier resource ceilings.
//!
//! Limits are a closed schema: one field per resource kind, one section per
//! tier. Adding a resource kind is a compile-time-checked change here and in
//! [`crate::types::quota::ResourceKind`].

use serde::{Deserialize, Serialize};

use crate::types::quota::ResourceKind;

/// Numeric ceilings for a single tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum active (non-deleted) clothing items.
    pub clothing_items: u32,
    /// Maximum try-on sessions created per calendar month (UTC).
    pub try_ons_per_month: u32,
    /// Maximum simultaneously active sessions.
    pub concurrent_sessions: u32,
}

impl TierLimits {
    /// Return the ceiling for the given resource kind.
    pub fn limit_for(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::ClothingItems => self.clothing_items,
            ResourceKind::TryOnsPerMonth => self.try_ons_per_month,
            ResourceKind::ConcurrentSessions => self.concurrent_sessions,
        }
    }
}

/// Ceilings per tier name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierLimitsConfig {
    /// Free tier.
    #[serde(default = "default_free")]
    pub free: TierLimits,
    /// Premium tier.
    #[serde(default = "default_premium")]
    pub premium: TierLimits,
    /// Administrative tier.
    #[serde(default = "default_staff")]
    pub staff: TierLimits,
}

impl Default for TierLimitsConfig {
    fn default() -> Self {
        Self {
            free: default_free(),
            premium: default_premium(),
            staff: default_staff(),
        }
    }
}

fn default_free() -> TierLimits {
    TierLimits {
        clothing_items: 100,
        try_ons_per_month: 30,
        concurrent_sessions: 1,
    }
}

fn default_premium() -> TierLimits {
    TierLimits {
        clothing_items: 1_000,
        try_ons_per_month: 500,
        concurrent_sessions: 1,
    }
}

fn default_staff() -> TierLimits {
    TierLimits {
        clothing_items: 10_000,
        try_ons_per_month: 10_000,
        concurrent_sessions: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_for_covers_every_kind() {
        let limits = TierLimits {
            clothing_items: 1,
            try_ons_per_month: 2,
            concurrent_sessions: 3,
        };
        assert_eq!(limits.limit_for(ResourceKind::ClothingItems), 1);
        assert_eq!(limits.limit_for(ResourceKind::TryOnsPerMonth), 2);
        assert_eq!(limits.limit_for(ResourceKind::ConcurrentSessions), 3);
    }

    #[test]
    fn test_default_free_tier() {
        let config = TierLimitsConfig::default();
        assert_eq!(config.free.clothing_items, 100);
        assert_eq!(config.free.concurrent_sessions, 1);
    }
}
