use sqlx::PgPool;
use switchboard_application::{
    ActivityLogService, AdminService, AuthorizationService, ContentService, EndUserService,
    PermissionService, ReportService, TaskService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub admin_service: AdminService,
    pub permission_service: PermissionService,
    pub end_user_service: EndUserService,
    pub content_service: ContentService,
    pub report_service: ReportService,
    pub task_service: TaskService,
    pub activity_log_service: ActivityLogService,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
