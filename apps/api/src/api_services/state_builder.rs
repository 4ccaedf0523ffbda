use std::sync::Arc;

use sqlx::PgPool;
use switchboard_application::{
    ActivityLogService, AdminService, AuthorizationService, ContentService, EndUserService,
    PermissionService, ReportService, TaskService,
};
use switchboard_infrastructure::{
    Argon2PasswordHasher, PostgresActivityLogRepository, PostgresAdminUserRepository,
    PostgresAuthorizationRepository, PostgresContentRepository, PostgresEndUserRepository,
    PostgresTaskRepository,
};

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let authorization_repository = Arc::new(PostgresAuthorizationRepository::new(pool.clone()));
    let admin_repository = Arc::new(PostgresAdminUserRepository::new(pool.clone()));
    let end_user_repository = Arc::new(PostgresEndUserRepository::new(pool.clone()));
    let content_repository = Arc::new(PostgresContentRepository::new(pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let activity_log_repository = Arc::new(PostgresActivityLogRepository::new(pool.clone()));

    let authorization_service = AuthorizationService::new(authorization_repository.clone());
    let activity_log_service =
        ActivityLogService::new(authorization_service.clone(), activity_log_repository);

    AppState {
        admin_service: AdminService::new(
            authorization_service.clone(),
            admin_repository.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            activity_log_service.clone(),
        ),
        permission_service: PermissionService::new(
            authorization_service.clone(),
            admin_repository.clone(),
            authorization_repository,
            activity_log_service.clone(),
        ),
        end_user_service: EndUserService::new(
            authorization_service.clone(),
            end_user_repository,
            admin_repository.clone(),
            activity_log_service.clone(),
        ),
        content_service: ContentService::new(
            authorization_service.clone(),
            content_repository.clone(),
            activity_log_service.clone(),
        ),
        report_service: ReportService::new(
            authorization_service.clone(),
            content_repository,
            activity_log_service.clone(),
        ),
        task_service: TaskService::new(
            authorization_service.clone(),
            task_repository,
            admin_repository,
            activity_log_service.clone(),
        ),
        activity_log_service,
        authorization_service,
        postgres_pool: pool,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    }
}
