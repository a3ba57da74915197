//! Session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use wardrobe_core::error::{AppError, ErrorKind};
use wardrobe_core::result::AppResult;
use wardrobe_entity::session::{CreateSession, Session, SessionStatus};

use crate::store::SessionStore;

/// PostgreSQL-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new session store on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list sessions", e))
    }

    async fn list_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE owner_id = $1 AND status IN ('pending', 'processing') \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to list active sessions", e)
        })
    }

    async fn count_active_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE owner_id = $1 AND status IN ('pending', 'processing')",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to count active sessions", e)
        })?;
        Ok(count)
    }

    async fn count_created_since(&self, owner_id: Uuid, since: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE owner_id = $1 AND created_at >= $2",
        )
        .bind(owner_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to count monthly sessions", e)
        })?;
        Ok(count)
    }

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find session", e))
    }

    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (owner_id, metadata) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to create session", e))
    }

    async fn update_status(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "UPDATE sessions SET status = $3, metadata = COALESCE($4, metadata), updated_at = NOW() \
             WHERE owner_id = $1 AND id = $2 RETURNING *",
        )
        .bind(owner_id)
        .bind(session_id)
        .bind(status)
        .bind(&metadata)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to update session status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))
    }

    async fn mark_completed(&self, owner_id: Uuid, exclude: Option<Uuid>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET status = 'completed', updated_at = NOW() \
             WHERE owner_id = $1 AND status IN ('pending', 'processing') \
             AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(owner_id)
        .bind(exclude)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to complete active sessions", e)
        })?;

        Ok(result.rows_affected())
    }

    async fn complete_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET status = 'completed', updated_at = NOW() \
             WHERE status IN ('pending', 'processing') AND updated_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to complete stale sessions", e)
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_all_for_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to delete sessions", e)
            })?;

        Ok(result.rows_affected())
    }
}
