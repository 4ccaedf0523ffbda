use std::sync::Arc;

use serde_json::json;
use switchboard_core::{AppError, AppResult, NonEmptyString};
use switchboard_domain::{
    ActivityAction, AdminRole, AdminStatus, AdminUserId, EmailAddress, EndUserId, EndUserStatus,
    Permission, PermissionRequirement, Principal, Username,
};

use crate::{
    ActivityEvent, ActivityLogService, AdminUserRepository, AuthorizationService, EndUser,
    EndUserProfile, EndUserQuery, EndUserRepository, NewEndUser,
};

/// Maximum page size for end-user listings.
pub const END_USER_LIST_MAX_LIMIT: usize = 100;

/// Input for creating an end-user profile.
#[derive(Debug, Clone)]
pub struct CreateEndUserParams {
    /// Platform handle.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Public display name.
    pub display_name: String,
    /// Optional profile text.
    pub bio: Option<String>,
    /// Optional initial assignee.
    pub assigned_to: Option<AdminUserId>,
}

/// Input for editing an end-user profile.
#[derive(Debug, Clone)]
pub struct UpdateEndUserParams {
    /// Contact email.
    pub email: String,
    /// Public display name.
    pub display_name: String,
    /// Optional profile text.
    pub bio: Option<String>,
}

/// Application service for end-user profiles.
///
/// Managers only reach profiles assigned to them. Out-of-scope profiles read
/// as missing and reject writes with `Forbidden`.
#[derive(Clone)]
pub struct EndUserService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn EndUserRepository>,
    admin_repository: Arc<dyn AdminUserRepository>,
    activity_log_service: ActivityLogService,
}

impl EndUserService {
    /// Creates a new end-user service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn EndUserRepository>,
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

    /// Lists end users visible to the actor.
    pub async fn list_end_users(
        &self,
        actor: &Principal,
        query: EndUserQuery,
    ) -> AppResult<Vec<EndUser>> {
        self.authorization_service
            .require(actor, Permission::UserView)?;

        let assigned_to = match actor.role() {
            AdminRole::Manager => Some(actor.id()),
            AdminRole::SuperAdmin | AdminRole::Admin => query.assigned_to,
        };

        self.repository
            .list_end_users(EndUserQuery {
                assigned_to,
                search: query
                    .search
                    .map(|search| search.trim().to_owned())
                    .filter(|search| !search.is_empty()),
                limit: query.limit.clamp(1, END_USER_LIST_MAX_LIMIT),
                ..query
            })
            .await
    }

    /// Returns one end user visible to the actor.
    pub async fn get_end_user(
        &self,
        actor: &Principal,
        end_user_id: EndUserId,
    ) -> AppResult<EndUser> {
        self.authorization_service
            .require(actor, Permission::UserView)?;

        let end_user = self.require_end_user(end_user_id).await?;
        if !actor.can_access_end_user(end_user.assigned_to) {
            return Err(not_found(end_user_id));
        }

        Ok(end_user)
    }

    /// Creates an end-user profile.
    ///
    /// A manager's new profile is assigned to that manager. An explicit
    /// assignee needs the same grants as [`Self::assign_end_user`].
    pub async fn create_end_user(
        &self,
        actor: &Principal,
        params: CreateEndUserParams,
    ) -> AppResult<EndUser> {
        self.authorization_service
            .require(actor, Permission::UserCreate)?;

        let assigned_to = match params.assigned_to {
            Some(assignee) if assignee != actor.id() || actor.role() != AdminRole::Manager => {
                self.authorization_service
                    .require(actor, assignment_requirement())?;
                self.validate_assignee(assignee).await?;
                Some(assignee)
            }
            Some(assignee) => Some(assignee),
            None if actor.role() == AdminRole::Manager => Some(actor.id()),
            None => None,
        };

        let end_user = self
            .repository
            .create_end_user(NewEndUser {
                username: Username::new(params.username)?,
                email: EmailAddress::new(params.email)?,
                display_name: NonEmptyString::new(params.display_name)?.into(),
                bio: normalize_bio(params.bio),
                assigned_to,
            })
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::UserCreated,
                format!("created end user '{}'", end_user.username),
                json!({ "end_user_id": end_user.id, "username": end_user.username }),
            ))
            .await;

        Ok(end_user)
    }

    /// Replaces editable profile fields.
    pub async fn update_end_user(
        &self,
        actor: &Principal,
        end_user_id: EndUserId,
        params: UpdateEndUserParams,
    ) -> AppResult<EndUser> {
        self.authorization_service
            .require(actor, Permission::UserEdit)?;
        self.require_writable(actor, end_user_id).await?;

        let end_user = self
            .repository
            .update_end_user(
                end_user_id,
                EndUserProfile {
                    email: EmailAddress::new(params.email)?,
                    display_name: NonEmptyString::new(params.display_name)?.into(),
                    bio: normalize_bio(params.bio),
                },
            )
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::UserUpdated,
                format!("updated end user '{}'", end_user.username),
                json!({ "end_user_id": end_user_id }),
            ))
            .await;

        Ok(end_user)
    }

    /// Changes the moderation standing of an end user.
    pub async fn set_end_user_status(
        &self,
        actor: &Principal,
        end_user_id: EndUserId,
        status: EndUserStatus,
    ) -> AppResult<EndUser> {
        self.authorization_service
            .require(actor, Permission::UserEdit)?;
        let before = self.require_writable(actor, end_user_id).await?;

        let end_user = self
            .repository
            .set_end_user_status(end_user_id, status)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::UserStatusChanged,
                format!(
                    "changed end user '{}' from '{}' to '{}'",
                    end_user.username,
                    before.status.as_str(),
                    status.as_str()
                ),
                json!({
                    "end_user_id": end_user_id,
                    "from": before.status.as_str(),
                    "to": status.as_str(),
                }),
            ))
            .await;

        Ok(end_user)
    }

    /// Assigns an end user to a staff member, or clears the assignment.
    ///
    /// Requires both `USER_MANAGE` and `ADMIN_VIEW`. The assignee must be an
    /// active manager or admin.
    pub async fn assign_end_user(
        &self,
        actor: &Principal,
        end_user_id: EndUserId,
        assigned_to: Option<AdminUserId>,
    ) -> AppResult<EndUser> {
        self.authorization_service
            .require(actor, assignment_requirement())?;
        let before = self.require_writable(actor, end_user_id).await?;

        if let Some(assignee) = assigned_to {
            self.validate_assignee(assignee).await?;
        }

        let end_user = self
            .repository
            .assign_end_user(end_user_id, assigned_to)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::UserAssigned,
                format!("reassigned end user '{}'", end_user.username),
                json!({
                    "end_user_id": end_user_id,
                    "from": before.assigned_to,
                    "to": assigned_to,
                }),
            ))
            .await;

        Ok(end_user)
    }

    /// Deletes an end user with its content and reports.
    pub async fn delete_end_user(
        &self,
        actor: &Principal,
        end_user_id: EndUserId,
    ) -> AppResult<()> {
        self.authorization_service
            .require(actor, Permission::UserDelete)?;
        let end_user = self.require_writable(actor, end_user_id).await?;

        self.repository.delete_end_user(end_user_id).await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::UserDeleted,
                format!("deleted end user '{}'", end_user.username),
                json!({ "end_user_id": end_user_id, "username": end_user.username }),
            ))
            .await;

        Ok(())
    }

    async fn require_end_user(&self, end_user_id: EndUserId) -> AppResult<EndUser> {
        self.repository
            .find_end_user(end_user_id)
            .await?
            .ok_or_else(|| not_found(end_user_id))
    }

    async fn require_writable(
        &self,
        actor: &Principal,
        end_user_id: EndUserId,
    ) -> AppResult<EndUser> {
        let end_user = self.require_end_user(end_user_id).await?;
        if !actor.can_access_end_user(end_user.assigned_to) {
            return Err(AppError::Forbidden(format!(
                "end user '{end_user_id}' is not assigned to you"
            )));
        }

        Ok(end_user)
    }

    async fn validate_assignee(&self, assignee: AdminUserId) -> AppResult<()> {
        let account = self
            .admin_repository
            .find_admin(assignee)
            .await?
            .ok_or_else(|| AppError::Validation(format!("assignee '{assignee}' does not exist")))?;

        if account.status != AdminStatus::Active
            || !matches!(account.role, AdminRole::Admin | AdminRole::Manager)
        {
            return Err(AppError::Validation(format!(
                "assignee '{assignee}' must be an active manager or admin"
            )));
        }

        Ok(())
    }
}

fn assignment_requirement() -> PermissionRequirement {
    PermissionRequirement::all([Permission::UserManage, Permission::AdminView])
}

fn not_found(end_user_id: EndUserId) -> AppError {
    AppError::NotFound(format!("end user '{end_user_id}' not found"))
}

fn normalize_bio(bio: Option<String>) -> Option<String> {
    bio.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests;
