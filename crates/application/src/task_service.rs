//! Task use-cases.
//!
//! Transitions are read-validate-write: the lifecycle guard in the domain
//! computes the next value and the repository stores it with a version
//! compare-and-swap.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{
    ActivityAction, AdminStatus, AdminUserId, Permission, Principal, Task, TaskAction, TaskId,
    TaskStatus, TaskTransition,
};
use tracing::info;

use crate::{
    ActivityEvent, ActivityLogService, AdminUserRepository, AuthorizationService, TaskQuery,
    TaskRepository,
};

/// Maximum page size for task listings.
pub const TASK_LIST_MAX_LIMIT: usize = 100;

/// Input for creating a task.
#[derive(Debug, Clone)]
pub struct CreateTaskParams {
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Staff member who will own the work.
    pub assigned_to: AdminUserId,
    /// Optional due date.
    pub due_at: Option<DateTime<Utc>>,
}

/// Application service for tasks and their lifecycle.
#[derive(Clone)]
pub struct TaskService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn TaskRepository>,
    admin_repository: Arc<dyn AdminUserRepository>,
    activity_log_service: ActivityLogService,
}

impl TaskService {
    /// Creates a new task service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn TaskRepository>,
        admin_repository: Arc<dyn AdminUserRepository>,
        activity_log_service: ActivityLogService,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            admin_repository,
            activity_log_service,
        }
    }

    /// Creates a pending task assigned by the actor.
    pub async fn create_task(
        &self,
        actor: &Principal,
        params: CreateTaskParams,
    ) -> AppResult<Task> {
        self.authorization_service
            .require(actor, Permission::TaskCreate)?;

        let assignee = self
            .admin_repository
            .find_admin(params.assigned_to)
            .await?
            .filter(|account| account.status == AdminStatus::Active)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "assignee '{}' must be an active admin account",
                    params.assigned_to
                ))
            })?;

        let task = Task::create(
            params.title,
            params.description,
            assignee.id,
            actor.id(),
            params.due_at,
            Utc::now(),
        )?;
        let task = self.repository.create_task(&task).await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::TaskCreated,
                format!("assigned task '{}' to '{}'", task.title(), assignee.email),
                json!({ "task_id": task.id(), "assigned_to": assignee.id }),
            ))
            .await;

        Ok(task)
    }

    /// Lists tasks visible to the actor.
    ///
    /// The super-role sees every task; everyone else sees tasks assigned to
    /// or by them.
    pub async fn list_tasks(
        &self,
        actor: &Principal,
        status: Option<TaskStatus>,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<Task>> {
        self.authorization_service
            .require(actor, Permission::TaskView)?;

        let participant = (!actor.is_super_admin()).then(|| actor.id());
        self.repository
            .list_tasks(TaskQuery {
                participant,
                status,
                limit: limit.clamp(1, TASK_LIST_MAX_LIMIT),
                offset,
            })
            .await
    }

    /// Returns one task the actor participates in.
    pub async fn get_task(&self, actor: &Principal, task_id: TaskId) -> AppResult<Task> {
        self.authorization_service
            .require(actor, Permission::TaskView)?;

        let task = self.require_task(task_id).await?;
        if !task.is_visible_to(actor) {
            return Err(AppError::Forbidden(format!(
                "task '{task_id}' is not assigned to or by you"
            )));
        }

        Ok(task)
    }

    /// Applies one lifecycle transition.
    ///
    /// The actor and source status are validated by the domain guard before
    /// anything is written. Concurrent transitions of the same task fail
    /// with `Conflict`. The activity record is best-effort.
    pub async fn transition_task(
        &self,
        actor: &Principal,
        task_id: TaskId,
        transition: TaskTransition,
    ) -> AppResult<Task> {
        let task = self.require_task(task_id).await?;
        let action = transition.action();
        let next = task.apply(actor, transition, Utc::now())?;
        let saved = self.repository.save_task(&next, task.version()).await?;

        info!(
            %task_id,
            actor_id = %actor.id(),
            action = action.as_str(),
            from = task.status().as_str(),
            to = saved.status().as_str(),
            "task transitioned"
        );

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                activity_action(action),
                format!(
                    "moved task '{}' from '{}' to '{}'",
                    saved.title(),
                    task.status(),
                    saved.status()
                ),
                json!({
                    "task_id": task_id,
                    "from": task.status().as_str(),
                    "to": saved.status().as_str(),
                }),
            ))
            .await;

        Ok(saved)
    }

    /// Deletes a task.
    pub async fn delete_task(&self, actor: &Principal, task_id: TaskId) -> AppResult<()> {
        self.authorization_service
            .require(actor, Permission::TaskManage)?;

        let task = self.require_task(task_id).await?;
        self.repository.delete_task(task_id).await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::TaskDeleted,
                format!("deleted task '{}'", task.title()),
                json!({ "task_id": task_id, "status": task.status().as_str() }),
            ))
            .await;

        Ok(())
    }

    async fn require_task(&self, task_id: TaskId) -> AppResult<Task> {
        self.repository
            .find_task(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' not found")))
    }
}

fn activity_action(action: TaskAction) -> ActivityAction {
    match action {
        TaskAction::StartTask => ActivityAction::TaskStarted,
        TaskAction::RequestCompletion => ActivityAction::TaskCompletionRequested,
        TaskAction::ApproveCompletion => ActivityAction::TaskApproved,
        TaskAction::RejectCompletion => ActivityAction::TaskRejected,
    }
}

#[cfg(test)]
mod tests;
