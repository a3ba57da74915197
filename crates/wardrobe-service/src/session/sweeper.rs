//! Background sweep of stale sessions.
//!
//! Inline cleanup during admission only reclaims an owner's sessions when
//! that owner next asks for admission; the sweeper bounds how long an
//! abandoned session can stay active regardless.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use wardrobe_core::config::SessionConfig;

use super::lifecycle::SessionLifecycleManager;

/// Periodically force-completes sessions past the staleness threshold.
#[derive(Clone)]
pub struct StaleSessionSweeper {
    lifecycle: Arc<SessionLifecycleManager>,
    interval: Duration,
}

impl std::fmt::Debug for StaleSessionSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaleSessionSweeper")
            .field("interval", &self.interval)
            .finish()
    }
}

impl StaleSessionSweeper {
    /// Creates a new sweeper.
    pub fn new(lifecycle: Arc<SessionLifecycleManager>, config: &SessionConfig) -> Self {
        Self {
            lifecycle,
            interval: Duration::from_secs(config.sweep_interval_minutes * 60),
        }
    }

    /// Runs sweep cycles until the shutdown channel flips to `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.lifecycle.sweep_stale(Utc::now()).await {
                        error!(error = %e, "Stale session sweep failed");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Stale session sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}
