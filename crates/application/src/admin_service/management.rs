use serde_json::json;
use switchboard_core::NonEmptyString;
use switchboard_domain::{ActivityAction, AdminStatus, Permission};

use crate::{ActivityEvent, AdminAccountQuery};

use super::*;

impl AdminService {
    /// Lists admin accounts.
    pub async fn list_admins(
        &self,
        actor: &Principal,
        query: AdminAccountQuery,
    ) -> AppResult<Vec<AdminAccount>> {
        self.authorization_service
            .require(actor, Permission::AdminView)?;
        self.repository.list_admins(query).await
    }

    /// Returns one admin account.
    pub async fn get_admin(
        &self,
        actor: &Principal,
        admin_id: AdminUserId,
    ) -> AppResult<AdminAccount> {
        self.authorization_service
            .require(actor, Permission::AdminView)?;
        self.require_account(admin_id).await
    }

    /// Returns the caller's own account. Needs no permission.
    pub async fn current_admin(&self, actor: &Principal) -> AppResult<AdminAccount> {
        self.require_account(actor.id()).await
    }

    /// Creates an active account directly.
    pub async fn create_admin(
        &self,
        actor: &Principal,
        params: CreateAdminParams,
    ) -> AppResult<AdminAccount> {
        self.authorization_service
            .require(actor, Permission::AdminCreate)?;

        if params.role.is_super_role() && !actor.is_super_admin() {
            return Err(AppError::Forbidden(
                "only a super admin may create super admin accounts".to_owned(),
            ));
        }

        let role = params.role;
        let account = self
            .insert_account(
                RegisterAdminParams {
                    email: params.email,
                    password: params.password,
                    display_name: params.display_name,
                },
                role,
                AdminStatus::Active,
            )
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::AdminCreated,
                format!("created {} account '{}'", role.as_str(), account.email),
                json!({ "admin_id": account.id, "role": role.as_str() }),
            ))
            .await;

        Ok(account)
    }

    /// Activates a pending self-registered account.
    pub async fn approve_admin(
        &self,
        actor: &Principal,
        admin_id: AdminUserId,
    ) -> AppResult<AdminAccount> {
        self.authorization_service
            .require(actor, Permission::AdminApprove)?;

        let account = self.require_account(admin_id).await?;
        if account.status != AdminStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "admin account '{admin_id}' is '{}'; only pending accounts can be approved",
                account.status.as_str()
            )));
        }

        let account = self
            .repository
            .set_admin_status(admin_id, AdminStatus::Active)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::AdminApproved,
                format!("approved admin account '{}'", account.email),
                json!({ "admin_id": admin_id }),
            ))
            .await;

        Ok(account)
    }

    /// Updates display name and role.
    ///
    /// Granting or revoking the super-role needs a super admin, and nobody
    /// may change their own role.
    pub async fn update_admin(
        &self,
        actor: &Principal,
        admin_id: AdminUserId,
        params: UpdateAdminParams,
    ) -> AppResult<AdminAccount> {
        self.authorization_service
            .require(actor, Permission::AdminEdit)?;

        let account = self.require_account(admin_id).await?;
        ensure_may_manage(actor, &account, "edit")?;

        let role = params.role.unwrap_or(account.role);
        if role != account.role {
            ensure_not_self(actor, admin_id, "change the role of")?;
            if role.is_super_role() && !actor.is_super_admin() {
                return Err(AppError::Forbidden(
                    "only a super admin may grant the super admin role".to_owned(),
                ));
            }
        }

        let display_name = match params.display_name {
            Some(display_name) => NonEmptyString::new(display_name)?.into(),
            None => account.display_name.clone(),
        };

        let updated = self
            .repository
            .update_admin(admin_id, &display_name, role)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::AdminUpdated,
                format!("updated admin account '{}'", updated.email),
                json!({
                    "admin_id": admin_id,
                    "from_role": account.role.as_str(),
                    "to_role": updated.role.as_str(),
                }),
            ))
            .await;

        Ok(updated)
    }

    /// Disables an account so it can no longer sign in or act.
    pub async fn disable_admin(
        &self,
        actor: &Principal,
        admin_id: AdminUserId,
    ) -> AppResult<AdminAccount> {
        self.authorization_service
            .require(actor, Permission::AdminEdit)?;
        ensure_not_self(actor, admin_id, "disable")?;

        let account = self.require_account(admin_id).await?;
        ensure_may_manage(actor, &account, "disable")?;

        let account = self
            .repository
            .set_admin_status(admin_id, AdminStatus::Disabled)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::AdminDisabled,
                format!("disabled admin account '{}'", account.email),
                json!({ "admin_id": admin_id }),
            ))
            .await;

        Ok(account)
    }

    /// Deletes an account. End users assigned to it become unassigned.
    pub async fn delete_admin(&self, actor: &Principal, admin_id: AdminUserId) -> AppResult<()> {
        self.authorization_service
            .require(actor, Permission::AdminDelete)?;
        ensure_not_self(actor, admin_id, "delete")?;

        let account = self.require_account(admin_id).await?;
        ensure_may_manage(actor, &account, "delete")?;

        self.repository.delete_admin(admin_id).await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::AdminDeleted,
                format!("deleted admin account '{}'", account.email),
                json!({ "admin_id": admin_id, "email": account.email }),
            ))
            .await;

        Ok(())
    }
}
