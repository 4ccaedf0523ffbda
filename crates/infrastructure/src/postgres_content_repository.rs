//! PostgreSQL-backed content and content-report repositories.
//!
//! Both read models join the author's `end_users` row so that manager
//! scoping can filter on the author's assignee.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use switchboard_application::{
    ContentItem, ContentModeration, ContentQuery, ContentReport, ContentRepository, ReportQuery,
    ReportRepository,
};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{
    AdminUserId, ContentId, ContentStatus, EndUserId, ReportId, ReportStatus,
};

/// PostgreSQL implementation of the content and report ports.
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    id: uuid::Uuid,
    author_id: uuid::Uuid,
    author_username: String,
    author_assigned_to: Option<uuid::Uuid>,
    body: String,
    media_url: Option<String>,
    status: String,
    moderation_notes: Option<String>,
    moderated_by: Option<uuid::Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for ContentItem {
    type Error = AppError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let status = ContentStatus::from_str(row.status.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode status for content '{}': {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: ContentId::from_uuid(row.id),
            author_id: EndUserId::from_uuid(row.author_id),
            author_username: row.author_username,
            author_assigned_to: row.author_assigned_to.map(AdminUserId::from_uuid),
            body: row.body,
            media_url: row.media_url,
            status,
            moderation_notes: row.moderation_notes,
            moderated_by: row.moderated_by.map(AdminUserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: uuid::Uuid,
    content_id: uuid::Uuid,
    reporter_id: uuid::Uuid,
    author_assigned_to: Option<uuid::Uuid>,
    reason: String,
    status: String,
    resolution_notes: Option<String>,
    resolved_by: Option<uuid::Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for ContentReport {
    type Error = AppError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let status = ReportStatus::from_str(row.status.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode status for report '{}': {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: ReportId::from_uuid(row.id),
            content_id: ContentId::from_uuid(row.content_id),
            reporter_id: EndUserId::from_uuid(row.reporter_id),
            author_assigned_to: row.author_assigned_to.map(AdminUserId::from_uuid),
            reason: row.reason,
            status,
            resolution_notes: row.resolution_notes,
            resolved_by: row.resolved_by.map(AdminUserId::from_uuid),
            created_at: row.created_at,
        })
    }
}

const CONTENT_SELECT: &str = r#"
    SELECT
        content.id,
        content.author_id,
        authors.username AS author_username,
        authors.assigned_to AS author_assigned_to,
        content.body,
        content.media_url,
        content.status,
        content.moderation_notes,
        content.moderated_by,
        content.created_at,
        content.updated_at
    FROM content
    INNER JOIN end_users AS authors ON authors.id = content.author_id
"#;

const REPORT_SELECT: &str = r#"
    SELECT
        reports.id,
        reports.content_id,
        reports.reporter_id,
        authors.assigned_to AS author_assigned_to,
        reports.reason,
        reports.status,
        reports.resolution_notes,
        reports.resolved_by,
        reports.created_at
    FROM content_reports AS reports
    INNER JOIN content ON content.id = reports.content_id
    INNER JOIN end_users AS authors ON authors.id = content.author_id
"#;

fn content_not_found(content_id: ContentId) -> AppError {
    AppError::NotFound(format!("content '{content_id}' does not exist"))
}

fn page_bounds(limit: usize, offset: usize) -> (i64, i64) {
    (
        i64::try_from(limit).unwrap_or(i64::MAX),
        i64::try_from(offset).unwrap_or(i64::MAX),
    )
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_content(&self, content_id: ContentId) -> AppResult<Option<ContentItem>> {
        let statement = format!("{CONTENT_SELECT} WHERE content.id = $1");

        sqlx::query_as::<_, ContentRow>(statement.as_str())
            .bind(content_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load content: {error}")))?
            .map(ContentItem::try_from)
            .transpose()
    }

    async fn list_content(&self, query: ContentQuery) -> AppResult<Vec<ContentItem>> {
        let statement = format!(
            r#"
            {CONTENT_SELECT}
            WHERE ($1::TEXT IS NULL OR content.status = $1)
                AND ($2::UUID IS NULL OR content.author_id = $2)
                AND ($3::UUID IS NULL OR authors.assigned_to = $3)
            ORDER BY content.created_at DESC
            LIMIT $4
            OFFSET $5
            "#
        );
        let (limit, offset) = page_bounds(query.limit, query.offset);

        let rows = sqlx::query_as::<_, ContentRow>(statement.as_str())
            .bind(query.status.map(|status| status.as_str()))
            .bind(query.author_id.map(|author_id| author_id.as_uuid()))
            .bind(query.author_assigned_to.map(|admin_id| admin_id.as_uuid()))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list content: {error}")))?;

        rows.into_iter().map(ContentItem::try_from).collect()
    }

    async fn update_content(
        &self,
        content_id: ContentId,
        body: &str,
        media_url: Option<&str>,
    ) -> AppResult<ContentItem> {
        let result = sqlx::query(
            r#"
            UPDATE content
            SET body = $2, media_url = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(content_id.as_uuid())
        .bind(body)
        .bind(media_url)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update content: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(content_not_found(content_id));
        }

        self.find_content(content_id)
            .await?
            .ok_or_else(|| content_not_found(content_id))
    }

    async fn moderate_content(
        &self,
        content_id: ContentId,
        moderation: ContentModeration,
    ) -> AppResult<ContentItem> {
        let result = sqlx::query(
            r#"
            UPDATE content
            SET status = $2, moderation_notes = $3, moderated_by = $4, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(content_id.as_uuid())
        .bind(moderation.status.as_str())
        .bind(moderation.notes)
        .bind(moderation.moderated_by.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to moderate content: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(content_not_found(content_id));
        }

        self.find_content(content_id)
            .await?
            .ok_or_else(|| content_not_found(content_id))
    }

    async fn delete_content(&self, content_id: ContentId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(content_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete content: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(content_not_found(content_id));
        }

        Ok(())
    }
}

#[async_trait]
impl ReportRepository for PostgresContentRepository {
    async fn find_report(&self, report_id: ReportId) -> AppResult<Option<ContentReport>> {
        let statement = format!("{REPORT_SELECT} WHERE reports.id = $1");

        sqlx::query_as::<_, ReportRow>(statement.as_str())
            .bind(report_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load report: {error}")))?
            .map(ContentReport::try_from)
            .transpose()
    }

    async fn list_reports(&self, query: ReportQuery) -> AppResult<Vec<ContentReport>> {
        let statement = format!(
            r#"
            {REPORT_SELECT}
            WHERE ($1::TEXT IS NULL OR reports.status = $1)
                AND ($2::UUID IS NULL OR reports.content_id = $2)
                AND ($3::UUID IS NULL OR authors.assigned_to = $3)
            ORDER BY reports.created_at DESC
            LIMIT $4
            OFFSET $5
            "#
        );
        let (limit, offset) = page_bounds(query.limit, query.offset);

        let rows = sqlx::query_as::<_, ReportRow>(statement.as_str())
            .bind(query.status.map(|status| status.as_str()))
            .bind(query.content_id.map(|content_id| content_id.as_uuid()))
            .bind(query.author_assigned_to.map(|admin_id| admin_id.as_uuid()))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list reports: {error}")))?;

        rows.into_iter().map(ContentReport::try_from).collect()
    }

    async fn close_report(
        &self,
        report_id: ReportId,
        status: ReportStatus,
        notes: Option<&str>,
        resolved_by: AdminUserId,
    ) -> AppResult<ContentReport> {
        let result = sqlx::query(
            r#"
            UPDATE content_reports
            SET status = $2, resolution_notes = $3, resolved_by = $4, resolved_at = now()
            WHERE id = $1
                AND status = 'open'
            "#,
        )
        .bind(report_id.as_uuid())
        .bind(status.as_str())
        .bind(notes)
        .bind(resolved_by.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to close report: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "report '{report_id}' is no longer open"
            )));
        }

        self.find_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report '{report_id}' does not exist")))
    }
}

#[cfg(test)]
mod tests;
