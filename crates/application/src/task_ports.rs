use async_trait::async_trait;
use switchboard_core::AppResult;
use switchboard_domain::{AdminUserId, Task, TaskId, TaskStatus};

/// Filter and page for task listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Only tasks assigned to or by this staff member.
    pub participant: Option<AdminUserId>,
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Rows skipped.
    pub offset: usize,
}

/// Repository port for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>>;

    /// Inserts a newly created task.
    async fn create_task(&self, task: &Task) -> AppResult<Task>;

    /// Persists a transitioned task if the stored version still equals
    /// `expected_version`, returning the task with its bumped version.
    ///
    /// A stale version fails with `Conflict` and writes nothing.
    async fn save_task(&self, task: &Task, expected_version: i64) -> AppResult<Task>;

    /// Lists tasks, newest first.
    async fn list_tasks(&self, query: TaskQuery) -> AppResult<Vec<Task>>;

    /// Deletes a task.
    async fn delete_task(&self, task_id: TaskId) -> AppResult<()>;
}
