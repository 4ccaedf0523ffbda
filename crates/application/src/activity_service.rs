use std::sync::Arc;

use switchboard_core::AppResult;
use switchboard_domain::{Permission, Principal};
use tracing::warn;

use crate::{
    ActivityEvent, ActivityLogEntry, ActivityLogQuery, ActivityLogRepository,
    AuthorizationService,
};

/// Maximum page size for activity listings.
pub const ACTIVITY_LOG_MAX_LIMIT: usize = 200;

/// Application service for the staff activity log.
#[derive(Clone)]
pub struct ActivityLogService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn ActivityLogRepository>,
}

impl ActivityLogService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
        }
    }

    /// Appends an activity event without failing the caller.
    ///
    /// A storage failure is logged and swallowed so the primary operation
    /// that produced the event is never rolled back or reported as failed.
    pub async fn record(&self, event: ActivityEvent) {
        let action = event.action;
        let actor_id = event.actor_id;

        if let Err(error) = self.repository.append_entry(event).await {
            warn!(
                action = action.as_str(),
                %actor_id,
                %error,
                "failed to append activity log entry"
            );
        }
    }

    /// Returns recent activity entries.
    pub async fn list(
        &self,
        actor: &Principal,
        query: ActivityLogQuery,
    ) -> AppResult<Vec<ActivityLogEntry>> {
        self.authorization_service
            .require(actor, Permission::ActivityView)?;

        self.repository
            .list_entries(ActivityLogQuery {
                limit: query.limit.clamp(1, ACTIVITY_LOG_MAX_LIMIT),
                ..query
            })
            .await
    }
}
