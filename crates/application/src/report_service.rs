use std::sync::Arc;

use serde_json::json;
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{
    ActivityAction, AdminRole, Permission, Principal, ReportId, ReportResolution, ReportStatus,
};

use crate::{
    ActivityEvent, ActivityLogService, AuthorizationService, CONTENT_LIST_MAX_LIMIT,
    ContentReport, ReportQuery, ReportRepository,
};

/// Application service for content reports.
#[derive(Clone)]
pub struct ReportService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn ReportRepository>,
    activity_log_service: ActivityLogService,
}

impl ReportService {
    /// Creates a new report service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn ReportRepository>,
        activity_log_service: ActivityLogService,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            activity_log_service,
        }
    }

    /// Lists reports visible to the actor.
    pub async fn list_reports(
        &self,
        actor: &Principal,
        query: ReportQuery,
    ) -> AppResult<Vec<ContentReport>> {
        self.authorization_service
            .require(actor, Permission::ReportView)?;

        let author_assigned_to = match actor.role() {
            AdminRole::Manager => Some(actor.id()),
            AdminRole::SuperAdmin | AdminRole::Admin => query.author_assigned_to,
        };

        self.repository
            .list_reports(ReportQuery {
                author_assigned_to,
                limit: query.limit.clamp(1, CONTENT_LIST_MAX_LIMIT),
                ..query
            })
            .await
    }

    /// Resolves or dismisses an open report.
    pub async fn resolve_report(
        &self,
        actor: &Principal,
        report_id: ReportId,
        resolution: ReportResolution,
        notes: Option<String>,
    ) -> AppResult<ContentReport> {
        self.authorization_service
            .require(actor, Permission::ReportManage)?;

        let report = self
            .repository
            .find_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report '{report_id}' not found")))?;

        if !actor.can_access_end_user(report.author_assigned_to) {
            return Err(AppError::Forbidden(format!(
                "report '{report_id}' concerns an end user not assigned to you"
            )));
        }

        if report.status != ReportStatus::Open {
            return Err(AppError::InvalidTransition(format!(
                "report '{report_id}' is already '{}'",
                report.status.as_str()
            )));
        }

        let notes = notes
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        let status = resolution.resulting_status();
        let report = self
            .repository
            .close_report(report_id, status, notes.as_deref(), actor.id())
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::ReportResolved,
                format!("marked report '{report_id}' as '{}'", status.as_str()),
                json!({
                    "report_id": report_id,
                    "content_id": report.content_id,
                    "status": status.as_str(),
                }),
            ))
            .await;

        Ok(report)
    }
}
