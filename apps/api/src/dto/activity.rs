use serde::{Deserialize, Serialize};
use switchboard_application::{ActivityLogEntry, ActivityLogQuery};
use switchboard_core::AppResult;
use switchboard_domain::AdminUserId;
use ts_rs::TS;

use super::common::{DEFAULT_PAGE_SIZE, timestamp};

/// API representation of one activity-log entry.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/activity-entry-response.ts"
)]
pub struct ActivityEntryResponse {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    pub description: String,
    #[ts(type = "Record<string, unknown>")]
    pub metadata: serde_json::Value,
    pub created_at: String,
}

impl From<ActivityLogEntry> for ActivityEntryResponse {
    fn from(value: ActivityLogEntry) -> Self {
        Self {
            id: value.entry_id,
            actor_id: value.actor_id.to_string(),
            action: value.action,
            description: value.description,
            metadata: value.metadata,
            created_at: timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivityQuery {
    pub action: Option<String>,
    pub actor_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListActivityQuery {
    pub fn into_query(self) -> AppResult<ActivityLogQuery> {
        let actor_id = self
            .actor_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(AdminUserId::parse)
            .transpose()?;

        Ok(ActivityLogQuery {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or_default(),
            action: self
                .action
                .map(|action| action.trim().to_owned())
                .filter(|action| !action.is_empty()),
            actor_id,
        })
    }
}
