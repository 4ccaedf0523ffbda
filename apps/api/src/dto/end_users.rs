use serde::{Deserialize, Serialize};
use switchboard_application::{EndUser, EndUserQuery};
use switchboard_core::AppResult;
use switchboard_domain::AdminUserId;
use ts_rs::TS;

use super::common::{DEFAULT_PAGE_SIZE, parse_optional, timestamp};

/// API representation of an end-user profile.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/end-user-response.ts"
)]
pub struct EndUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EndUser> for EndUserResponse {
    fn from(value: EndUser) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username,
            email: value.email,
            display_name: value.display_name,
            bio: value.bio,
            status: value.status.as_str().to_owned(),
            assigned_to: value.assigned_to.map(|admin_id| admin_id.to_string()),
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}

/// Filters and page for the end-user listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListEndUsersQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListEndUsersQuery {
    pub fn into_query(self) -> AppResult<EndUserQuery> {
        Ok(EndUserQuery {
            status: parse_optional(self.status)?,
            search: self.search,
            assigned_to: None,
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or_default(),
        })
    }
}

/// Payload for creating an end-user profile.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-end-user-request.ts"
)]
pub struct CreateEndUserRequest {
    pub username: String,
    pub email: String,
    pub display_name: String,
    #[ts(optional)]
    pub bio: Option<String>,
    #[ts(optional)]
    pub assigned_to: Option<String>,
}

impl CreateEndUserRequest {
    pub fn assignee(&self) -> AppResult<Option<AdminUserId>> {
        parse_admin_id(self.assigned_to.as_deref())
    }
}

/// Payload for editing an end-user profile.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-end-user-request.ts"
)]
pub struct UpdateEndUserRequest {
    pub email: String,
    pub display_name: String,
    #[ts(optional)]
    pub bio: Option<String>,
}

/// Payload for changing an end user's standing.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-end-user-status-request.ts"
)]
pub struct UpdateEndUserStatusRequest {
    pub status: String,
}

/// Payload for (un)assigning an end user to a staff member.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-end-user-request.ts"
)]
pub struct AssignEndUserRequest {
    pub assigned_to: Option<String>,
}

impl AssignEndUserRequest {
    pub fn assignee(&self) -> AppResult<Option<AdminUserId>> {
        parse_admin_id(self.assigned_to.as_deref())
    }
}

fn parse_admin_id(value: Option<&str>) -> AppResult<Option<AdminUserId>> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(AdminUserId::parse)
        .transpose()
}
