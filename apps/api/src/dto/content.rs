use serde::{Deserialize, Serialize};
use switchboard_application::{ContentItem, ContentQuery, ContentReport, ReportQuery};
use switchboard_core::AppResult;
use switchboard_domain::{ContentId, EndUserId, ModerationDecision, ReportResolution};
use ts_rs::TS;

use super::common::{DEFAULT_PAGE_SIZE, parse_optional, timestamp};

/// API representation of a posted content item.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/content-response.ts"
)]
pub struct ContentResponse {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub body: String,
    pub media_url: Option<String>,
    pub status: String,
    pub moderation_notes: Option<String>,
    pub moderated_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContentItem> for ContentResponse {
    fn from(value: ContentItem) -> Self {
        Self {
            id: value.id.to_string(),
            author_id: value.author_id.to_string(),
            author_username: value.author_username,
            body: value.body,
            media_url: value.media_url,
            status: value.status.as_str().to_owned(),
            moderation_notes: value.moderation_notes,
            moderated_by: value.moderated_by.map(|admin_id| admin_id.to_string()),
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContentQuery {
    pub status: Option<String>,
    pub author_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListContentQuery {
    pub fn into_query(self) -> AppResult<ContentQuery> {
        let author_id = self
            .author_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(EndUserId::parse)
            .transpose()?;

        Ok(ContentQuery {
            status: parse_optional(self.status)?,
            author_id,
            author_assigned_to: None,
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or_default(),
        })
    }
}

/// Payload for editing a content item.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-content-request.ts"
)]
pub struct UpdateContentRequest {
    pub body: String,
    #[ts(optional)]
    pub media_url: Option<String>,
}

/// Payload for a moderation decision.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/moderate-content-request.ts"
)]
pub struct ModerateContentRequest {
    pub decision: String,
    #[ts(optional)]
    pub notes: Option<String>,
}

impl ModerateContentRequest {
    pub fn decision(&self) -> AppResult<ModerationDecision> {
        self.decision.trim().parse()
    }
}

/// API representation of a content report.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/report-response.ts"
)]
pub struct ReportResponse {
    pub id: String,
    pub content_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub status: String,
    pub resolution_notes: Option<String>,
    pub resolved_by: Option<String>,
    pub created_at: String,
}

impl From<ContentReport> for ReportResponse {
    fn from(value: ContentReport) -> Self {
        Self {
            id: value.id.to_string(),
            content_id: value.content_id.to_string(),
            reporter_id: value.reporter_id.to_string(),
            reason: value.reason,
            status: value.status.as_str().to_owned(),
            resolution_notes: value.resolution_notes,
            resolved_by: value.resolved_by.map(|admin_id| admin_id.to_string()),
            created_at: timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsQuery {
    pub status: Option<String>,
    pub content_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListReportsQuery {
    pub fn into_query(self) -> AppResult<ReportQuery> {
        let content_id = self
            .content_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ContentId::parse)
            .transpose()?;

        Ok(ReportQuery {
            status: parse_optional(self.status)?,
            content_id,
            author_assigned_to: None,
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or_default(),
        })
    }
}

/// Payload for closing an open report.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resolve-report-request.ts"
)]
pub struct ResolveReportRequest {
    pub resolution: String,
    #[ts(optional)]
    pub notes: Option<String>,
}

impl ResolveReportRequest {
    pub fn resolution(&self) -> AppResult<ReportResolution> {
        self.resolution.trim().parse()
    }
}
