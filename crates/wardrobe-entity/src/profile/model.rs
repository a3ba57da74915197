//! Owner profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::tier::Tier;

/// An owner's profile record.
///
/// Profiles are written by the surrounding account system; this service only
/// reads them to resolve the owner's tier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// The owner this profile belongs to.
    pub owner_id: Uuid,
    /// The owner's service tier.
    pub tier: Tier,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}
