use std::sync::Arc;

use switchboard_core::AppError;
use switchboard_domain::{AdminRole, AdminStatus, EndUserStatus, Permission, Principal};

use crate::test_support::{
    FakeActivityLogRepository, FakeAdminUserRepository, FakeEndUserRepository,
    FakePrincipalRepository, principal,
};
use crate::{ActivityLogService, AuthorizationService, EndUserQuery};

use super::{CreateEndUserParams, EndUserService};

struct Fixture {
    service: EndUserService,
    admins: Arc<FakeAdminUserRepository>,
}

fn fixture() -> Fixture {
    let authorization_service =
        AuthorizationService::new(Arc::new(FakePrincipalRepository::default()));
    let admins = Arc::new(FakeAdminUserRepository::default());
    let activity = ActivityLogService::new(
        authorization_service.clone(),
        Arc::new(FakeActivityLogRepository::default()),
    );

    Fixture {
        service: EndUserService::new(
            authorization_service,
            Arc::new(FakeEndUserRepository::default()),
            admins.clone(),
            activity,
        ),
        admins,
    }
}

fn params(username: &str) -> CreateEndUserParams {
    CreateEndUserParams {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        display_name: username.to_owned(),
        bio: None,
        assigned_to: None,
    }
}

fn query() -> EndUserQuery {
    EndUserQuery {
        status: None,
        search: None,
        assigned_to: None,
        limit: 50,
        offset: 0,
    }
}

fn admin() -> Principal {
    principal(
        AdminRole::Admin,
        &[
            Permission::UserView,
            Permission::UserCreate,
            Permission::UserEdit,
            Permission::UserManage,
            Permission::AdminView,
        ],
    )
}

#[tokio::test]
async fn manager_creations_are_self_assigned_and_scoped() {
    let fixture = fixture();
    let manager = principal(
        AdminRole::Manager,
        &[Permission::UserView, Permission::UserCreate],
    );

    let own = match fixture.service.create_end_user(&manager, params("night_owl")).await {
        Ok(end_user) => end_user,
        Err(error) => panic!("create failed: {error}"),
    };
    assert_eq!(own.assigned_to, Some(manager.id()));

    let foreign = match fixture.service.create_end_user(&admin(), params("early_bird")).await {
        Ok(end_user) => end_user,
        Err(error) => panic!("create failed: {error}"),
    };

    let listed = fixture.service.list_end_users(&manager, query()).await;
    let usernames: Vec<_> = listed
        .unwrap_or_default()
        .into_iter()
        .map(|end_user| end_user.username)
        .collect();
    assert_eq!(usernames, vec!["night_owl".to_owned()]);

    let hidden = fixture.service.get_end_user(&manager, foreign.id).await;
    assert!(matches!(hidden, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn assignment_requires_both_manage_and_admin_view() {
    let fixture = fixture();
    let end_user = match fixture.service.create_end_user(&admin(), params("night_owl")).await {
        Ok(end_user) => end_user,
        Err(error) => panic!("create failed: {error}"),
    };
    let manager = fixture.admins.seed(AdminRole::Manager).await;

    let partial = principal(AdminRole::Admin, &[Permission::UserManage]);
    let result = fixture
        .service
        .assign_end_user(&partial, end_user.id, Some(manager.id))
        .await;
    let Err(AppError::PermissionDenied(denial)) = result else {
        panic!("expected permission denial");
    };
    assert_eq!(denial.missing, vec!["ADMIN_VIEW".to_owned()]);

    let assigned = fixture
        .service
        .assign_end_user(&admin(), end_user.id, Some(manager.id))
        .await;
    assert_eq!(
        assigned.map(|end_user| end_user.assigned_to).ok(),
        Some(Some(manager.id))
    );
}

#[tokio::test]
async fn assignee_must_be_active_staff() {
    let fixture = fixture();
    let end_user = match fixture.service.create_end_user(&admin(), params("night_owl")).await {
        Ok(end_user) => end_user,
        Err(error) => panic!("create failed: {error}"),
    };
    let pending = fixture
        .admins
        .seed_with_status(AdminRole::Manager, AdminStatus::Pending)
        .await;

    let result = fixture
        .service
        .assign_end_user(&admin(), end_user.id, Some(pending.id))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn manager_cannot_change_status_of_unassigned_user() {
    let fixture = fixture();
    let end_user = match fixture.service.create_end_user(&admin(), params("night_owl")).await {
        Ok(end_user) => end_user,
        Err(error) => panic!("create failed: {error}"),
    };
    let manager = principal(AdminRole::Manager, &[Permission::UserEdit]);

    let result = fixture
        .service
        .set_end_user_status(&manager, end_user.id, EndUserStatus::Banned)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let suspended = fixture
        .service
        .set_end_user_status(&admin(), end_user.id, EndUserStatus::Suspended)
        .await;
    assert_eq!(
        suspended.map(|end_user| end_user.status).ok(),
        Some(EndUserStatus::Suspended)
    );
}

#[tokio::test]
async fn invalid_username_is_rejected() {
    let fixture = fixture();
    let result = fixture
        .service
        .create_end_user(&admin(), params("no spaces allowed"))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
