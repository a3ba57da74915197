//! Token verification configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying bearer tokens issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider.
    pub jwt_secret: String,
    /// Access token TTL in minutes (used when minting tokens for tooling).
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
}

fn default_access_ttl() -> u64 {
    60
}
