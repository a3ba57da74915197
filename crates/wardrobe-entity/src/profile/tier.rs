//! Service tier enumeration.

use serde::{Deserialize, Serialize};

/// Named service levels that determine resource ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Default tier for new owners.
    Free,
    /// Paid tier with raised ceilings.
    Premium,
    /// Administrative tier; grants access to maintenance endpoints.
    Staff,
}

impl Tier {
    /// Check if this tier grants administrative access.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }

    /// Return the tier as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
