use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use switchboard_application::AdminAccountQuery;
use switchboard_domain::{AdminUserId, Principal};

use crate::dto::{
    AdminResponse, CreateAdminRequest, ListAdminsQuery, UpdateAdminRequest,
    UpdateAdminRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod accounts;
mod lifecycle;

pub use accounts::{
    create_admin_handler, get_admin_handler, list_admins_handler, update_admin_handler,
    update_admin_role_handler,
};
pub use lifecycle::{approve_admin_handler, delete_admin_handler, disable_admin_handler};
