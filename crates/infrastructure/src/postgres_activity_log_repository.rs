use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use switchboard_application::{
    ACTIVITY_LOG_MAX_LIMIT, ActivityEvent, ActivityLogEntry, ActivityLogQuery,
    ActivityLogRepository,
};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::AdminUserId;

/// PostgreSQL-backed append-only activity log.
#[derive(Clone)]
pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityLogRow {
    id: uuid::Uuid,
    actor_id: uuid::Uuid,
    action: String,
    description: String,
    metadata: Value,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append_entry(&self, event: ActivityEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_log (id, actor_id, action, description, metadata)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(uuid::Uuid::new_v4())
        .bind(event.actor_id.as_uuid())
        .bind(event.action.as_str())
        .bind(event.description.as_str())
        .bind(&event.metadata)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to append activity entry '{}': {error}",
                event.action.as_str()
            ))
        })?;

        Ok(())
    }

    async fn list_entries(&self, query: ActivityLogQuery) -> AppResult<Vec<ActivityLogEntry>> {
        let limit = i64::try_from(query.limit.clamp(1, ACTIVITY_LOG_MAX_LIMIT)).unwrap_or(i64::MAX);
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            SELECT id, actor_id, action, description, metadata, created_at
            FROM activity_log
            WHERE ($1::TEXT IS NULL OR action = $1)
                AND ($2::UUID IS NULL OR actor_id = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            OFFSET $4
            "#,
        )
        .bind(query.action)
        .bind(query.actor_id.map(|actor_id| actor_id.as_uuid()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list activity log entries: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| ActivityLogEntry {
                entry_id: row.id.to_string(),
                actor_id: AdminUserId::from_uuid(row.actor_id),
                action: row.action,
                description: row.description,
                metadata: row.metadata,
                created_at: row.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests;
