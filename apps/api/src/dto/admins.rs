use std::str::FromStr;

use serde::{Deserialize, Serialize};
use switchboard_application::{
    AdminAccount, AdminAccountQuery, AdminPermissions, CreateAdminParams, UpdateAdminParams,
};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminRole, Permission, PermissionSet};
use ts_rs::TS;

use super::common::{parse_optional, timestamp};

/// API representation of an admin-staff account.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/admin-response.ts"
)]
pub struct AdminResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub status: String,
    pub created_at: String,
}

impl From<AdminAccount> for AdminResponse {
    fn from(value: AdminAccount) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email,
            display_name: value.display_name,
            role: value.role.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            created_at: timestamp(value.created_at),
        }
    }
}

/// Filters for the admin listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListAdminsQuery {
    pub status: Option<String>,
    pub role: Option<String>,
}

impl TryFrom<ListAdminsQuery> for AdminAccountQuery {
    type Error = AppError;

    fn try_from(value: ListAdminsQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_optional(value.status)?,
            role: parse_optional(value.role)?,
        })
    }
}

/// Payload for creating an active staff account.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-admin-request.ts"
)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
}

/// Partial update of a staff account.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-admin-request.ts"
)]
pub struct UpdateAdminRequest {
    #[ts(optional)]
    pub display_name: Option<String>,
    #[ts(optional)]
    pub role: Option<String>,
}

/// Role-only update of a staff account.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-admin-role-request.ts"
)]
pub struct UpdateAdminRoleRequest {
    pub role: String,
}

/// Catalog entry for a permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub name: String,
    pub description: String,
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            name: value.as_str().to_owned(),
            description: value.description().to_owned(),
        }
    }
}

/// Explicit and effective grants of one staff account.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/admin-permissions-response.ts"
)]
pub struct AdminPermissionsResponse {
    pub admin_id: String,
    pub role: String,
    pub granted: Vec<String>,
    pub effective: Vec<String>,
}

impl From<AdminPermissions> for AdminPermissionsResponse {
    fn from(value: AdminPermissions) -> Self {
        Self {
            admin_id: value.admin_id.to_string(),
            role: value.role.as_str().to_owned(),
            granted: value.granted.names(),
            effective: value.effective.names(),
        }
    }
}

/// Replacement grant set for a staff account.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/replace-permissions-request.ts"
)]
pub struct ReplacePermissionsRequest {
    pub permissions: Vec<String>,
}

impl ReplacePermissionsRequest {
    pub fn into_permission_set(self) -> AppResult<PermissionSet> {
        PermissionSet::from_names(self.permissions.iter().map(String::as_str))
    }
}

impl CreateAdminRequest {
    pub fn into_params(self) -> AppResult<CreateAdminParams> {
        Ok(CreateAdminParams {
            role: parse_role(&self.role)?,
            email: self.email,
            password: self.password,
            display_name: self.display_name,
        })
    }
}

impl UpdateAdminRequest {
    pub fn into_params(self) -> AppResult<UpdateAdminParams> {
        Ok(UpdateAdminParams {
            display_name: self.display_name,
            role: self.role.as_deref().map(parse_role).transpose()?,
        })
    }
}

impl UpdateAdminRoleRequest {
    pub fn into_params(self) -> AppResult<UpdateAdminParams> {
        Ok(UpdateAdminParams {
            display_name: None,
            role: Some(parse_role(&self.role)?),
        })
    }
}

fn parse_role(value: &str) -> AppResult<AdminRole> {
    AdminRole::from_str(value.trim())
}
