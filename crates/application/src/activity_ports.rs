use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use switchboard_core::AppResult;
use switchboard_domain::{ActivityAction, AdminUserId};

/// Immutable activity event emitted by application services.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    /// Staff member that performed the action.
    pub actor_id: AdminUserId,
    /// Stable action identifier.
    pub action: ActivityAction,
    /// Human-readable summary.
    pub description: String,
    /// Structured context, always a JSON object.
    pub metadata: Value,
}

impl ActivityEvent {
    /// Creates an event for the given actor and action.
    #[must_use]
    pub fn new(
        actor_id: AdminUserId,
        action: ActivityAction,
        description: impl Into<String>,
        metadata: Value,
    ) -> Self {
        Self {
            actor_id,
            action,
            description: description.into(),
            metadata,
        }
    }
}

/// Activity log entry projection for administrative views.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLogEntry {
    /// Stable entry identifier.
    pub entry_id: String,
    /// Acting staff member.
    pub actor_id: AdminUserId,
    /// Stable action identifier.
    pub action: String,
    /// Human-readable summary.
    pub description: String,
    /// Structured context.
    pub metadata: Value,
    /// Entry timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query parameters for activity log listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLogQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional action filter.
    pub action: Option<String>,
    /// Optional actor filter.
    pub actor_id: Option<AdminUserId>,
}

/// Port for the append-only activity log.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Persists one activity event.
    async fn append_entry(&self, event: ActivityEvent) -> AppResult<()>;

    /// Lists most recent entries first.
    async fn list_entries(&self, query: ActivityLogQuery) -> AppResult<Vec<ActivityLogEntry>>;
}
