//! Application services and ports.

#![forbid(unsafe_code)]

mod activity_ports;
mod activity_service;
mod admin_ports;
mod admin_service;
mod authorization_service;
mod content_ports;
mod content_service;
mod end_user_ports;
mod end_user_service;
mod permission_service;
mod report_service;
mod task_ports;
mod task_service;

#[cfg(test)]
mod test_support;

pub use activity_ports::{
    ActivityEvent, ActivityLogEntry, ActivityLogQuery, ActivityLogRepository,
};
pub use activity_service::{ACTIVITY_LOG_MAX_LIMIT, ActivityLogService};
pub use admin_ports::{
    AdminAccount, AdminAccountQuery, AdminCredentials, AdminUserRepository, NewAdminAccount,
    PasswordHasher, PermissionRepository,
};
pub use admin_service::{
    AdminService, CreateAdminParams, LoginOutcome, RegisterAdminParams, UpdateAdminParams,
};
pub use authorization_service::{AuthorizationService, PrincipalRepository};
pub use content_ports::{
    ContentItem, ContentModeration, ContentQuery, ContentReport, ContentRepository, ReportQuery,
    ReportRepository,
};
pub use content_service::{CONTENT_LIST_MAX_LIMIT, ContentService};
pub use end_user_ports::{EndUser, EndUserProfile, EndUserQuery, EndUserRepository, NewEndUser};
pub use end_user_service::{
    CreateEndUserParams, END_USER_LIST_MAX_LIMIT, EndUserService, UpdateEndUserParams,
};
pub use permission_service::{AdminPermissions, PermissionService};
pub use report_service::ReportService;
pub use task_ports::{TaskQuery, TaskRepository};
pub use task_service::{CreateTaskParams, TASK_LIST_MAX_LIMIT, TaskService};
