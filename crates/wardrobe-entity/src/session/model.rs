//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of a session.
///
/// `Pending` and `Processing` are the active states; `Completed` and
/// `Failed` are terminal. Terminal rows are immutable apart from bookkeeping
/// timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Work has been requested but not started.
    Pending,
    /// Work is underway.
    Processing,
    /// Work finished successfully (or was force-closed).
    Completed,
    /// Work finished with an error.
    Failed,
}

impl SessionStatus {
    /// Whether this status counts toward the active-session quota.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Pending may move to any other state; Processing may only finish;
    /// terminal states accept nothing.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        match self {
            Self::Pending => next != Self::Pending,
            Self::Processing => next.is_terminal(),
            Self::Completed | Self::Failed => false,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of tracked, owner-scoped work (a try-on run).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The owner this session belongs to.
    pub owner_id: Uuid,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// Free-form metadata (JSON).
    pub metadata: Option<serde_json::Value>,
    /// When the session was created. Never changes after creation.
    pub created_at: DateTime<Utc>,
    /// When the session was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session counts toward the active-session quota.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Data required to create a new session. New sessions start `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The owner this session belongs to.
    pub owner_id: Uuid,
    /// Free-form metadata (JSON).
    pub metadata: Option<serde_json::Value>,
}
