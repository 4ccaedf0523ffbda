mod activity;
mod admins;
mod auth;
mod common;
mod content;
mod end_users;
mod tasks;

pub use activity::{ActivityEntryResponse, ListActivityQuery};
pub use admins::{
    AdminPermissionsResponse, AdminResponse, CreateAdminRequest, ListAdminsQuery,
    PermissionResponse, ReplacePermissionsRequest, UpdateAdminRequest, UpdateAdminRoleRequest,
};
pub use auth::{BootstrapRequest, LoginRequest, RegisterRequest, SessionResponse};
pub use common::HealthResponse;
pub use content::{
    ContentResponse, ListContentQuery, ListReportsQuery, ModerateContentRequest, ReportResponse,
    ResolveReportRequest, UpdateContentRequest,
};
pub use end_users::{
    AssignEndUserRequest, CreateEndUserRequest, EndUserResponse, ListEndUsersQuery,
    UpdateEndUserRequest, UpdateEndUserStatusRequest,
};
pub use tasks::{CreateTaskRequest, ListTasksQuery, TaskResponse, TransitionTaskRequest};
