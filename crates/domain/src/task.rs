//! Task records and the task lifecycle guard.
//!
//! Legal transitions:
//!
//! | action | driven by | from | to |
//! |---|---|---|---|
//! | `start_task` | assignee | `pending` | `in_progress` |
//! | `request_completion` | assignee | `in_progress` | `completion_requested` |
//! | `approve_completion` | assigner | `completion_requested` | `approved` |
//! | `reject_completion` | assigner | `completion_requested` | `rejected` |
//!
//! The super-role may drive every edge. `approved` and `rejected` are
//! terminal. `completed` is a declared status with no inbound edge.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use switchboard_core::{AppError, AppResult, NonEmptyString};

use crate::{AdminUserId, Principal};

uuid_identifier!(
    /// Unique identifier for a task.
    TaskId
);

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not yet started.
    Pending,
    /// Started by the assignee.
    InProgress,
    /// Assignee asked the assigner to sign off.
    CompletionRequested,
    /// Assigner accepted the work.
    Approved,
    /// Assigner refused the work.
    Rejected,
    /// Declared for storage compatibility; no transition produces it.
    Completed,
}

impl TaskStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::CompletionRequested => "completion_requested",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Returns whether no transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Completed)
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completion_requested" => Ok(Self::CompletionRequested),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::Validation(format!(
                "unknown task status '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Transition trigger name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// `pending -> in_progress`.
    StartTask,
    /// `in_progress -> completion_requested`.
    RequestCompletion,
    /// `completion_requested -> approved`.
    ApproveCompletion,
    /// `completion_requested -> rejected`.
    RejectCompletion,
}

impl TaskAction {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartTask => "start_task",
            Self::RequestCompletion => "request_completion",
            Self::ApproveCompletion => "approve_completion",
            Self::RejectCompletion => "reject_completion",
        }
    }

    /// Returns the only status this action may leave from.
    #[must_use]
    pub fn source_status(&self) -> TaskStatus {
        match self {
            Self::StartTask => TaskStatus::Pending,
            Self::RequestCompletion => TaskStatus::InProgress,
            Self::ApproveCompletion | Self::RejectCompletion => TaskStatus::CompletionRequested,
        }
    }

    /// Returns the status this action produces.
    #[must_use]
    pub fn target_status(&self) -> TaskStatus {
        match self {
            Self::StartTask => TaskStatus::InProgress,
            Self::RequestCompletion => TaskStatus::CompletionRequested,
            Self::ApproveCompletion => TaskStatus::Approved,
            Self::RejectCompletion => TaskStatus::Rejected,
        }
    }

    /// Returns whether the assignee (rather than the assigner) drives this edge.
    #[must_use]
    pub fn is_driven_by_assignee(&self) -> bool {
        matches!(self, Self::StartTask | Self::RequestCompletion)
    }
}

impl FromStr for TaskAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "start_task" => Ok(Self::StartTask),
            "request_completion" => Ok(Self::RequestCompletion),
            "approve_completion" => Ok(Self::ApproveCompletion),
            "reject_completion" => Ok(Self::RejectCompletion),
            _ => Err(AppError::Validation(format!(
                "unknown task action '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for TaskAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One requested transition with its free-text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTransition {
    /// Assignee starts work.
    Start,
    /// Assignee asks for sign-off.
    RequestCompletion {
        /// Notes for the assigner.
        notes: Option<String>,
    },
    /// Assigner accepts the work.
    Approve {
        /// Approval notes.
        notes: Option<String>,
    },
    /// Assigner refuses the work.
    Reject {
        /// Rejection notes.
        notes: Option<String>,
    },
}

impl TaskTransition {
    /// Returns the trigger name of this transition.
    #[must_use]
    pub fn action(&self) -> TaskAction {
        match self {
            Self::Start => TaskAction::StartTask,
            Self::RequestCompletion { .. } => TaskAction::RequestCompletion,
            Self::Approve { .. } => TaskAction::ApproveCompletion,
            Self::Reject { .. } => TaskAction::RejectCompletion,
        }
    }
}

/// Full field set of a task, used to restore persisted tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParts {
    /// Task identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Staff member who owns the work.
    pub assigned_to: AdminUserId,
    /// Staff member who created the task.
    pub assigned_by: AdminUserId,
    /// Staff member who approved completion.
    pub approved_by: Option<AdminUserId>,
    /// When completion was requested.
    pub completion_requested_at: Option<DateTime<Utc>>,
    /// Notes attached to the completion request.
    pub completion_request_notes: Option<String>,
    /// When completion was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Notes attached to the approval.
    pub approval_notes: Option<String>,
    /// Notes attached to the rejection.
    pub rejection_notes: Option<String>,
    /// Optional due date.
    pub due_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency token, bumped by every persisted write.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Assignable unit of work with a bounded lifecycle.
///
/// `assigned_to` and `assigned_by` have no setters and are fixed once the
/// task exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    parts: TaskParts,
}

impl Task {
    /// Creates a new pending task.
    pub fn create(
        title: impl Into<String>,
        description: Option<String>,
        assigned_to: AdminUserId,
        assigned_by: AdminUserId,
        due_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let title = NonEmptyString::new(title)?;
        if title.as_str().chars().count() > 200 {
            return Err(AppError::Validation(
                "task title must not exceed 200 characters".to_owned(),
            ));
        }

        Ok(Self {
            parts: TaskParts {
                id: TaskId::new(),
                title: title.into(),
                description: normalize_notes(description),
                status: TaskStatus::Pending,
                assigned_to,
                assigned_by,
                approved_by: None,
                completion_requested_at: None,
                completion_request_notes: None,
                approved_at: None,
                approval_notes: None,
                rejection_notes: None,
                due_at,
                version: 0,
                created_at: now,
                updated_at: now,
            },
        })
    }

    /// Restores a persisted task.
    #[must_use]
    pub fn restore(parts: TaskParts) -> Self {
        Self { parts }
    }

    /// Returns the full field set.
    #[must_use]
    pub fn parts(&self) -> &TaskParts {
        &self.parts
    }

    /// Consumes the task into its field set.
    #[must_use]
    pub fn into_parts(self) -> TaskParts {
        self.parts
    }

    /// Returns the task identifier.
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.parts.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.parts.title.as_str()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.parts.status
    }

    /// Returns the owning staff member.
    #[must_use]
    pub fn assigned_to(&self) -> AdminUserId {
        self.parts.assigned_to
    }

    /// Returns the creating staff member.
    #[must_use]
    pub fn assigned_by(&self) -> AdminUserId {
        self.parts.assigned_by
    }

    /// Returns the persisted version token.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.parts.version
    }

    /// Returns whether the principal is a participant or holds the super-role.
    #[must_use]
    pub fn is_visible_to(&self, principal: &Principal) -> bool {
        principal.is_super_admin()
            || principal.id() == self.parts.assigned_to
            || principal.id() == self.parts.assigned_by
    }

    /// Validates and applies one transition, returning the updated task.
    ///
    /// The actor is checked before the source status, so a stranger always
    /// receives `Forbidden` whatever the task's state. `self` is never
    /// modified; on error the caller still holds the unchanged task.
    pub fn apply(
        &self,
        actor: &Principal,
        transition: TaskTransition,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let action = transition.action();

        let designated_actor = if action.is_driven_by_assignee() {
            self.parts.assigned_to
        } else {
            self.parts.assigned_by
        };
        if !actor.is_self_or_super_admin(designated_actor) {
            let party = if action.is_driven_by_assignee() {
                "assignee"
            } else {
                "assigner"
            };
            return Err(AppError::Forbidden(format!(
                "only the task {party} may perform '{action}' on task '{}'",
                self.parts.id
            )));
        }

        if self.parts.status != action.source_status() {
            return Err(AppError::InvalidTransition(format!(
                "cannot perform '{action}' on task '{}' in status '{}'; expected '{}'",
                self.parts.id,
                self.parts.status,
                action.source_status()
            )));
        }

        let mut next = self.parts.clone();
        next.status = action.target_status();
        next.updated_at = now;

        match transition {
            TaskTransition::Start => {}
            TaskTransition::RequestCompletion { notes } => {
                next.completion_requested_at = Some(now);
                next.completion_request_notes = normalize_notes(notes);
            }
            TaskTransition::Approve { notes } => {
                next.approved_at = Some(now);
                next.approved_by = Some(actor.id());
                next.approval_notes = normalize_notes(notes);
            }
            TaskTransition::Reject { notes } => {
                next.rejection_notes = normalize_notes(notes);
            }
        }

        Ok(Self { parts: next })
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use switchboard_core::AppError;

    use super::{Task, TaskAction, TaskParts, TaskStatus, TaskTransition};
    use crate::{AdminRole, AdminUserId, PermissionSet, Principal};

    fn staff(role: AdminRole) -> Principal {
        Principal::new(AdminUserId::new(), role, PermissionSet::new())
    }

    fn task_in(status: TaskStatus, assignee: &Principal, assigner: &Principal) -> Task {
        let created = Task::create(
            "Review flagged posts",
            Some("queue from overnight".to_owned()),
            assignee.id(),
            assigner.id(),
            None,
            Utc::now() - Duration::hours(1),
        );
        let mut parts = match created {
            Ok(task) => task.into_parts(),
            Err(error) => panic!("failed to create task: {error}"),
        };
        parts.status = status;
        Task::restore(parts)
    }

    fn unchanged_except(before: &TaskParts, after: &TaskParts) -> TaskParts {
        TaskParts {
            status: before.status,
            updated_at: before.updated_at,
            approved_by: before.approved_by,
            completion_requested_at: before.completion_requested_at,
            completion_request_notes: before.completion_request_notes.clone(),
            approved_at: before.approved_at,
            approval_notes: before.approval_notes.clone(),
            rejection_notes: before.rejection_notes.clone(),
            ..after.clone()
        }
    }

    #[test]
    fn create_rejects_blank_title() {
        let result =
            Task::create("  ", None, AdminUserId::new(), AdminUserId::new(), None, Utc::now());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn assignee_starts_and_stranger_is_forbidden_afterwards() {
        let assignee = staff(AdminRole::Manager);
        let assigner = staff(AdminRole::Admin);
        let stranger = staff(AdminRole::Manager);
        let task = task_in(TaskStatus::Pending, &assignee, &assigner);

        let started = task.apply(&assignee, TaskTransition::Start, Utc::now());
        let started = match started {
            Ok(task) => task,
            Err(error) => panic!("assignee should start task: {error}"),
        };
        assert_eq!(started.status(), TaskStatus::InProgress);

        let result = started.apply(&stranger, TaskTransition::Start, Utc::now());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(started.status(), TaskStatus::InProgress);
    }

    #[test]
    fn assigner_approval_records_notes_and_approver() {
        let assignee = staff(AdminRole::Manager);
        let assigner = staff(AdminRole::Admin);
        let task = task_in(TaskStatus::CompletionRequested, &assignee, &assigner);
        let now = Utc::now();

        let approved = task.apply(
            &assigner,
            TaskTransition::Approve {
                notes: Some("looks good".to_owned()),
            },
            now,
        );

        let approved = match approved {
            Ok(task) => task.into_parts(),
            Err(error) => panic!("assigner should approve: {error}"),
        };
        assert_eq!(approved.status, TaskStatus::Approved);
        assert_eq!(approved.approval_notes.as_deref(), Some("looks good"));
        assert_eq!(approved.approved_by, Some(assigner.id()));
        assert_eq!(approved.approved_at, Some(now));
    }

    #[test]
    fn wrong_source_status_is_rejected_and_task_unchanged() {
        let assignee = staff(AdminRole::Manager);
        let assigner = staff(AdminRole::Admin);

        for status in [
            TaskStatus::InProgress,
            TaskStatus::CompletionRequested,
            TaskStatus::Approved,
            TaskStatus::Rejected,
            TaskStatus::Completed,
        ] {
            let task = task_in(status, &assignee, &assigner);
            let before = task.clone();
            let result = task.apply(&assignee, TaskTransition::Start, Utc::now());

            assert!(matches!(result, Err(AppError::InvalidTransition(_))));
            assert_eq!(task, before);
        }
    }

    #[test]
    fn assignee_cannot_approve_and_assigner_cannot_start() {
        let assignee = staff(AdminRole::Manager);
        let assigner = staff(AdminRole::Admin);

        let requested = task_in(TaskStatus::CompletionRequested, &assignee, &assigner);
        let result =
            requested.apply(&assignee, TaskTransition::Approve { notes: None }, Utc::now());
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let pending = task_in(TaskStatus::Pending, &assignee, &assigner);
        let result = pending.apply(&assigner, TaskTransition::Start, Utc::now());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn super_admin_may_drive_every_edge() {
        let assignee = staff(AdminRole::Manager);
        let assigner = staff(AdminRole::Admin);
        let root = staff(AdminRole::SuperAdmin);
        let mut task = task_in(TaskStatus::Pending, &assignee, &assigner);

        for transition in [
            TaskTransition::Start,
            TaskTransition::RequestCompletion { notes: None },
            TaskTransition::Reject {
                notes: Some("missing screenshots".to_owned()),
            },
        ] {
            task = match task.apply(&root, transition, Utc::now()) {
                Ok(next) => next,
                Err(error) => panic!("super admin transition failed: {error}"),
            };
        }

        assert_eq!(task.status(), TaskStatus::Rejected);
        assert!(task.status().is_terminal());
    }

    #[test]
    fn transitions_touch_only_their_fields() {
        let assignee = staff(AdminRole::Manager);
        let assigner = staff(AdminRole::Admin);
        let now = Utc::now();

        let in_progress = task_in(TaskStatus::InProgress, &assignee, &assigner);
        let requested = in_progress.apply(
            &assignee,
            TaskTransition::RequestCompletion {
                notes: Some("  done, see thread  ".to_owned()),
            },
            now,
        );
        let requested = match requested {
            Ok(task) => task,
            Err(error) => panic!("request completion failed: {error}"),
        };
        let parts = requested.parts();
        assert_eq!(parts.status, TaskStatus::CompletionRequested);
        assert_eq!(parts.completion_requested_at, Some(now));
        assert_eq!(parts.completion_request_notes.as_deref(), Some("done, see thread"));
        assert_eq!(parts.updated_at, now);
        assert_eq!(&unchanged_except(in_progress.parts(), parts), in_progress.parts());

        let rejected = requested.apply(
            &assigner,
            TaskTransition::Reject {
                notes: Some("needs sources".to_owned()),
            },
            now,
        );
        let rejected = match rejected {
            Ok(task) => task.into_parts(),
            Err(error) => panic!("reject failed: {error}"),
        };
        assert_eq!(rejected.status, TaskStatus::Rejected);
        assert_eq!(rejected.rejection_notes.as_deref(), Some("needs sources"));
        assert_eq!(rejected.approved_at, None);
        assert_eq!(rejected.approved_by, None);
        assert_eq!(rejected.completion_requested_at, Some(now));
    }

    #[test]
    fn action_graph_is_linear() {
        assert_eq!(
            TaskAction::StartTask.target_status(),
            TaskAction::RequestCompletion.source_status()
        );
        assert_eq!(
            TaskAction::RequestCompletion.target_status(),
            TaskAction::ApproveCompletion.source_status()
        );
        assert_eq!(
            TaskAction::ApproveCompletion.source_status(),
            TaskAction::RejectCompletion.source_status()
        );
    }
}
