//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Session lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Age in minutes after which an active session with no updates is
    /// eligible for forced completion by the background sweeper.
    #[serde(default = "default_stale_after")]
    pub stale_after_minutes: u64,
    /// Interval in minutes between sweeper runs.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
    /// Whether the background sweeper is started at all.
    #[serde(default = "default_true")]
    pub sweeper_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stale_after_minutes: default_stale_after(),
            sweep_interval_minutes: default_sweep_interval(),
            sweeper_enabled: true,
        }
    }
}

fn default_stale_after() -> u64 {
    30
}

fn default_sweep_interval() -> u64 {
    15
}

fn default_true() -> bool {
    true
}
