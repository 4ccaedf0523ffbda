use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminUserId, Task, TaskAction, TaskStatus, TaskTransition};
use ts_rs::TS;

use super::common::{DEFAULT_PAGE_SIZE, parse_optional, timestamp};

/// API representation of a task.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-response.ts"
)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub assigned_to: String,
    pub assigned_by: String,
    pub approved_by: Option<String>,
    pub completion_requested_at: Option<String>,
    pub completion_request_notes: Option<String>,
    pub approved_at: Option<String>,
    pub approval_notes: Option<String>,
    pub rejection_notes: Option<String>,
    pub due_at: Option<String>,
    #[ts(type = "number")]
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(value: Task) -> Self {
        let parts = value.into_parts();
        Self {
            id: parts.id.to_string(),
            title: parts.title,
            description: parts.description,
            status: parts.status.as_str().to_owned(),
            assigned_to: parts.assigned_to.to_string(),
            assigned_by: parts.assigned_by.to_string(),
            approved_by: parts.approved_by.map(|admin_id| admin_id.to_string()),
            completion_requested_at: parts.completion_requested_at.map(timestamp),
            completion_request_notes: parts.completion_request_notes,
            approved_at: parts.approved_at.map(timestamp),
            approval_notes: parts.approval_notes,
            rejection_notes: parts.rejection_notes,
            due_at: parts.due_at.map(timestamp),
            version: parts.version,
            created_at: timestamp(parts.created_at),
            updated_at: timestamp(parts.updated_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListTasksQuery {
    pub fn status(&self) -> AppResult<Option<TaskStatus>> {
        parse_optional(self.status.clone())
    }

    pub fn page(&self) -> (usize, usize) {
        (
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            self.offset.unwrap_or_default(),
        )
    }
}

/// Payload for creating a task.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-task-request.ts"
)]
pub struct CreateTaskRequest {
    pub title: String,
    #[ts(optional)]
    pub description: Option<String>,
    pub assigned_to: String,
    #[ts(optional)]
    pub due_at: Option<String>,
}

impl CreateTaskRequest {
    pub fn assignee(&self) -> AppResult<AdminUserId> {
        AdminUserId::parse(self.assigned_to.trim())
    }

    pub fn due_at(&self) -> AppResult<Option<DateTime<Utc>>> {
        self.due_at
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                DateTime::parse_from_rfc3339(value)
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .map_err(|error| {
                        AppError::Validation(format!("invalid dueAt timestamp '{value}': {error}"))
                    })
            })
            .transpose()
    }
}

/// Payload for a task lifecycle transition.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/transition-task-request.ts"
)]
pub struct TransitionTaskRequest {
    pub action: String,
    #[ts(optional)]
    pub completion_request_notes: Option<String>,
    #[ts(optional)]
    pub approval_notes: Option<String>,
    #[ts(optional)]
    pub rejection_notes: Option<String>,
}

impl TransitionTaskRequest {
    /// Resolves the named trigger and picks the notes field it carries.
    ///
    /// Rejections fall back to `approvalNotes` for clients that send a single
    /// reviewer-notes field.
    pub fn into_transition(self) -> AppResult<TaskTransition> {
        let action: TaskAction = self.action.trim().parse()?;
        Ok(match action {
            TaskAction::StartTask => TaskTransition::Start,
            TaskAction::RequestCompletion => TaskTransition::RequestCompletion {
                notes: self.completion_request_notes,
            },
            TaskAction::ApproveCompletion => TaskTransition::Approve {
                notes: self.approval_notes,
            },
            TaskAction::RejectCompletion => TaskTransition::Reject {
                notes: self.rejection_notes.or(self.approval_notes),
            },
        })
    }
}
