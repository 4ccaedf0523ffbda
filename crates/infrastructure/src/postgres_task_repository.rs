//! PostgreSQL-backed task repository with optimistic concurrency.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use switchboard_application::{TaskQuery, TaskRepository};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminUserId, Task, TaskId, TaskParts, TaskStatus};

/// PostgreSQL implementation of the task port.
#[derive(Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: uuid::Uuid,
    title: String,
    description: Option<String>,
    status: String,
    assigned_to: uuid::Uuid,
    assigned_by: uuid::Uuid,
    approved_by: Option<uuid::Uuid>,
    completion_requested_at: Option<DateTime<Utc>>,
    completion_request_notes: Option<String>,
    approved_at: Option<DateTime<Utc>>,
    approval_notes: Option<String>,
    rejection_notes: Option<String>,
    due_at: Option<DateTime<Utc>>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_str(row.status.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode status for task '{}': {error}",
                row.id
            ))
        })?;

        Ok(Task::restore(TaskParts {
            id: TaskId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            status,
            assigned_to: AdminUserId::from_uuid(row.assigned_to),
            assigned_by: AdminUserId::from_uuid(row.assigned_by),
            approved_by: row.approved_by.map(AdminUserId::from_uuid),
            completion_requested_at: row.completion_requested_at,
            completion_request_notes: row.completion_request_notes,
            approved_at: row.approved_at,
            approval_notes: row.approval_notes,
            rejection_notes: row.rejection_notes,
            due_at: row.due_at,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

const TASK_COLUMNS: &str = r#"
    id,
    title,
    description,
    status,
    assigned_to,
    assigned_by,
    approved_by,
    completion_requested_at,
    completion_request_notes,
    approved_at,
    approval_notes,
    rejection_notes,
    due_at,
    version,
    created_at,
    updated_at
"#;

fn assignee_missing_or_internal(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::Validation("task participants must be existing staff".to_owned());
    }

    AppError::Internal(format!("failed to create task: {error}"))
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>> {
        let statement = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");

        sqlx::query_as::<_, TaskRow>(statement.as_str())
            .bind(task_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load task: {error}")))?
            .map(Task::try_from)
            .transpose()
    }

    async fn create_task(&self, task: &Task) -> AppResult<Task> {
        let parts = task.parts();
        let statement = format!(
            r#"
            INSERT INTO tasks (
                id,
                title,
                description,
                status,
                assigned_to,
                assigned_by,
                due_at,
                version,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TASK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TaskRow>(statement.as_str())
            .bind(parts.id.as_uuid())
            .bind(parts.title.as_str())
            .bind(parts.description.as_deref())
            .bind(parts.status.as_str())
            .bind(parts.assigned_to.as_uuid())
            .bind(parts.assigned_by.as_uuid())
            .bind(parts.due_at)
            .bind(parts.version)
            .bind(parts.created_at)
            .bind(parts.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(assignee_missing_or_internal)?;

        Task::try_from(row)
    }

    async fn save_task(&self, task: &Task, expected_version: i64) -> AppResult<Task> {
        let parts = task.parts();
        let statement = format!(
            r#"
            UPDATE tasks
            SET
                status = $3,
                approved_by = $4,
                completion_requested_at = $5,
                completion_request_notes = $6,
                approved_at = $7,
                approval_notes = $8,
                rejection_notes = $9,
                updated_at = $10,
                version = version + 1
            WHERE id = $1
                AND version = $2
            RETURNING {TASK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TaskRow>(statement.as_str())
            .bind(parts.id.as_uuid())
            .bind(expected_version)
            .bind(parts.status.as_str())
            .bind(parts.approved_by.map(|admin_id| admin_id.as_uuid()))
            .bind(parts.completion_requested_at)
            .bind(parts.completion_request_notes.as_deref())
            .bind(parts.approved_at)
            .bind(parts.approval_notes.as_deref())
            .bind(parts.rejection_notes.as_deref())
            .bind(parts.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to save task: {error}")))?;

        match row {
            Some(row) => Task::try_from(row),
            None if self.find_task(parts.id).await?.is_none() => Err(AppError::NotFound(
                format!("task '{}' does not exist", parts.id),
            )),
            None => {
                tracing::debug!(
                    task_id = %parts.id,
                    expected_version,
                    "task write lost a concurrent update"
                );
                Err(AppError::Conflict(format!(
                    "task '{}' was modified concurrently",
                    parts.id
                )))
            }
        }
    }

    async fn list_tasks(&self, query: TaskQuery) -> AppResult<Vec<Task>> {
        let statement = format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE ($1::UUID IS NULL OR assigned_to = $1 OR assigned_by = $1)
                AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3
            OFFSET $4
            "#
        );

        let rows = sqlx::query_as::<_, TaskRow>(statement.as_str())
            .bind(query.participant.map(|admin_id| admin_id.as_uuid()))
            .bind(query.status.map(|status| status.as_str()))
            .bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(query.offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list tasks: {error}")))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn delete_task(&self, task_id: TaskId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete task: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task '{task_id}' does not exist")));
        }

        Ok(())
    }
}
