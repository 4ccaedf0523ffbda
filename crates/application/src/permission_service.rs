use std::sync::Arc;

use serde_json::json;
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{
    ActivityAction, AdminRole, AdminUserId, Permission, PermissionSet, Principal,
};

use crate::{
    ActivityEvent, ActivityLogService, AdminUserRepository, AuthorizationService,
    PermissionRepository,
};

/// Permission grants of one admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPermissions {
    /// Account identifier.
    pub admin_id: AdminUserId,
    /// Staff role.
    pub role: AdminRole,
    /// Explicitly stored grants.
    pub granted: PermissionSet,
    /// Grants in force, the whole catalog for the super-role.
    pub effective: PermissionSet,
}

/// Application service for the permission catalog and explicit grants.
#[derive(Clone)]
pub struct PermissionService {
    authorization_service: AuthorizationService,
    admin_repository: Arc<dyn AdminUserRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
    activity_log_service: ActivityLogService,
}

impl PermissionService {
    /// Creates a new permission service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        admin_repository: Arc<dyn AdminUserRepository>,
        permission_repository: Arc<dyn PermissionRepository>,
        activity_log_service: ActivityLogService,
    ) -> Self {
        Self {
            authorization_service,
            admin_repository,
            permission_repository,
            activity_log_service,
        }
    }

    /// Returns the full permission catalog.
    pub fn catalog(&self, actor: &Principal) -> AppResult<&'static [Permission]> {
        self.authorization_service
            .require(actor, Permission::PermissionView)?;
        Ok(Permission::all())
    }

    /// Returns the grants of one admin account.
    ///
    /// Any account may read its own grants.
    pub async fn permissions_for_admin(
        &self,
        actor: &Principal,
        admin_id: AdminUserId,
    ) -> AppResult<AdminPermissions> {
        if actor.id() != admin_id {
            self.authorization_service
                .require(actor, Permission::PermissionView)?;
        }

        self.load(admin_id).await
    }

    /// Replaces the explicit grants of an admin account.
    ///
    /// Super admin targets are rejected since their grants are implicit. A
    /// non-super actor cannot edit its own grants and cannot hand out
    /// permissions it does not hold.
    pub async fn replace_permissions(
        &self,
        actor: &Principal,
        admin_id: AdminUserId,
        permissions: PermissionSet,
    ) -> AppResult<AdminPermissions> {
        self.authorization_service
            .require(actor, Permission::PermissionManage)?;

        let current = self.load(admin_id).await?;
        if current.role.is_super_role() {
            return Err(AppError::Validation(format!(
                "admin account '{admin_id}' is a super admin; its permissions are implicit"
            )));
        }

        if !actor.is_super_admin() {
            if actor.id() == admin_id {
                return Err(AppError::Forbidden(
                    "cannot change your own permissions".to_owned(),
                ));
            }

            let held = actor.effective_permissions();
            let escalated: Vec<String> = permissions
                .iter()
                .filter(|permission| {
                    !current.granted.contains(*permission) && !held.contains(*permission)
                })
                .map(|permission| permission.as_str().to_owned())
                .collect();
            if !escalated.is_empty() {
                return Err(AppError::Forbidden(format!(
                    "cannot grant permissions you do not hold: [{}]",
                    escalated.join(", ")
                )));
            }
        }

        self.permission_repository
            .replace_admin_permissions(admin_id, &permissions)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::PermissionsUpdated,
                format!("replaced permissions of admin account '{admin_id}'"),
                json!({
                    "admin_id": admin_id,
                    "from": current.granted.names(),
                    "to": permissions.names(),
                }),
            ))
            .await;

        Ok(AdminPermissions {
            admin_id,
            role: current.role,
            effective: permissions.clone(),
            granted: permissions,
        })
    }

    async fn load(&self, admin_id: AdminUserId) -> AppResult<AdminPermissions> {
        let account = self
            .admin_repository
            .find_admin(admin_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("admin account '{admin_id}' not found")))?;

        let granted = self
            .permission_repository
            .list_admin_permissions(admin_id)
            .await?;
        let effective =
            Principal::new(admin_id, account.role, granted.clone()).effective_permissions();

        Ok(AdminPermissions {
            admin_id,
            role: account.role,
            granted,
            effective,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use switchboard_core::AppError;
    use switchboard_domain::{AdminRole, Permission, PermissionSet};

    use crate::test_support::{
        FakeActivityLogRepository, FakeAdminUserRepository, FakePermissionRepository,
        FakePrincipalRepository, principal,
    };
    use crate::{ActivityLogService, AuthorizationService};

    use super::PermissionService;

    struct Fixture {
        service: PermissionService,
        admins: Arc<FakeAdminUserRepository>,
        grants: Arc<FakePermissionRepository>,
    }

    fn fixture() -> Fixture {
        let authorization_service =
            AuthorizationService::new(Arc::new(FakePrincipalRepository::default()));
        let admins = Arc::new(FakeAdminUserRepository::default());
        let grants = Arc::new(FakePermissionRepository::default());
        let activity = ActivityLogService::new(
            authorization_service.clone(),
            Arc::new(FakeActivityLogRepository::default()),
        );

        Fixture {
            service: PermissionService::new(
                authorization_service,
                admins.clone(),
                grants.clone(),
                activity,
            ),
            admins,
            grants,
        }
    }

    #[test]
    fn catalog_requires_permission_view() {
        let fixture = fixture();

        let denied = fixture.service.catalog(&principal(AdminRole::Manager, &[]));
        assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

        let catalog = fixture
            .service
            .catalog(&principal(AdminRole::Manager, &[Permission::PermissionView]));
        assert_eq!(catalog.map(<[Permission]>::len).ok(), Some(Permission::all().len()));
    }

    #[tokio::test]
    async fn replace_rejects_super_admin_targets() {
        let fixture = fixture();
        let target = fixture.admins.seed(AdminRole::SuperAdmin).await;

        let result = fixture
            .service
            .replace_permissions(
                &principal(AdminRole::SuperAdmin, &[]),
                target.id,
                PermissionSet::new(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn non_super_actor_cannot_grant_what_it_lacks() {
        let fixture = fixture();
        let target = fixture.admins.seed(AdminRole::Manager).await;
        let actor = principal(
            AdminRole::Admin,
            &[Permission::PermissionManage, Permission::UserView],
        );

        let escalation = fixture
            .service
            .replace_permissions(&actor, target.id, [Permission::AdminDelete].into_iter().collect())
            .await;
        assert!(matches!(escalation, Err(AppError::Forbidden(_))));

        let granted = fixture
            .service
            .replace_permissions(&actor, target.id, [Permission::UserView].into_iter().collect())
            .await;
        assert!(granted.is_ok());
        assert_eq!(
            fixture.grants.stored(target.id).await.names(),
            vec!["USER_VIEW".to_owned()]
        );
    }

    #[tokio::test]
    async fn reading_own_permissions_needs_no_grant() {
        let fixture = fixture();
        let account = fixture.admins.seed(AdminRole::Manager).await;
        let actor = switchboard_domain::Principal::new(
            account.id,
            AdminRole::Manager,
            PermissionSet::new(),
        );

        let own = fixture.service.permissions_for_admin(&actor, account.id).await;
        assert!(own.is_ok());

        let other = fixture.admins.seed(AdminRole::Admin).await;
        let result = fixture.service.permissions_for_admin(&actor, other.id).await;
        assert!(matches!(result, Err(AppError::PermissionDenied(_))));
    }
}
