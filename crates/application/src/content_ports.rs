use async_trait::async_trait;
use chrono::{DateTime, Utc};
use switchboard_core::AppResult;
use switchboard_domain::{
    AdminUserId, ContentId, ContentStatus, EndUserId, ReportId, ReportStatus,
};

/// Posted content item with its author's assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Content identifier.
    pub id: ContentId,
    /// Authoring end user.
    pub author_id: EndUserId,
    /// Authoring end user's handle.
    pub author_username: String,
    /// Staff member the author is assigned to.
    pub author_assigned_to: Option<AdminUserId>,
    /// Text body.
    pub body: String,
    /// Optional attached media location.
    pub media_url: Option<String>,
    /// Visibility state.
    pub status: ContentStatus,
    /// Notes from the last moderation decision.
    pub moderation_notes: Option<String>,
    /// Staff member behind the last moderation decision.
    pub moderated_by: Option<AdminUserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Filter and page for content listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    /// Only content in this state.
    pub status: Option<ContentStatus>,
    /// Only content by this author.
    pub author_id: Option<EndUserId>,
    /// Only content whose author is assigned to this staff member.
    pub author_assigned_to: Option<AdminUserId>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Rows skipped.
    pub offset: usize,
}

/// Moderation decision as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentModeration {
    /// Resulting visibility state.
    pub status: ContentStatus,
    /// Moderator notes.
    pub notes: Option<String>,
    /// Moderator.
    pub moderated_by: AdminUserId,
}

/// Repository port for content items.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds a content item by identifier.
    async fn find_content(&self, content_id: ContentId) -> AppResult<Option<ContentItem>>;

    /// Lists content, newest first.
    async fn list_content(&self, query: ContentQuery) -> AppResult<Vec<ContentItem>>;

    /// Replaces body and media.
    async fn update_content(
        &self,
        content_id: ContentId,
        body: &str,
        media_url: Option<&str>,
    ) -> AppResult<ContentItem>;

    /// Records a moderation decision.
    async fn moderate_content(
        &self,
        content_id: ContentId,
        moderation: ContentModeration,
    ) -> AppResult<ContentItem>;

    /// Deletes a content item with its reports.
    async fn delete_content(&self, content_id: ContentId) -> AppResult<()>;
}

/// Report filed by an end user against a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReport {
    /// Report identifier.
    pub id: ReportId,
    /// Reported content.
    pub content_id: ContentId,
    /// Reporting end user.
    pub reporter_id: EndUserId,
    /// Staff member the reported content's author is assigned to.
    pub author_assigned_to: Option<AdminUserId>,
    /// Free-text reason.
    pub reason: String,
    /// Handling state.
    pub status: ReportStatus,
    /// Notes recorded on closing.
    pub resolution_notes: Option<String>,
    /// Staff member who closed the report.
    pub resolved_by: Option<AdminUserId>,
    /// Filing timestamp.
    pub created_at: DateTime<Utc>,
}

/// Filter and page for report listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    /// Only reports in this state.
    pub status: Option<ReportStatus>,
    /// Only reports against this content.
    pub content_id: Option<ContentId>,
    /// Only reports whose content author is assigned to this staff member.
    pub author_assigned_to: Option<AdminUserId>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Rows skipped.
    pub offset: usize,
}

/// Repository port for content reports.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Finds a report by identifier.
    async fn find_report(&self, report_id: ReportId) -> AppResult<Option<ContentReport>>;

    /// Lists reports, newest first.
    async fn list_reports(&self, query: ReportQuery) -> AppResult<Vec<ContentReport>>;

    /// Closes an open report. Fails with `Conflict` if it is no longer open.
    async fn close_report(
        &self,
        report_id: ReportId,
        status: ReportStatus,
        notes: Option<&str>,
        resolved_by: AdminUserId,
    ) -> AppResult<ContentReport>;
}
