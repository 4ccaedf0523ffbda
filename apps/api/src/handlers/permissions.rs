use axum::Json;
use axum::extract::{Extension, Path, State};
use switchboard_domain::{AdminUserId, Principal};

use crate::dto::{AdminPermissionsResponse, PermissionResponse, ReplacePermissionsRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_permission_catalog_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let catalog = state
        .permission_service
        .catalog(&principal)?
        .iter()
        .copied()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(catalog))
}

pub async fn admin_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
) -> ApiResult<Json<AdminPermissionsResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let permissions = state
        .permission_service
        .permissions_for_admin(&principal, admin_id)
        .await?;

    Ok(Json(permissions.into()))
}

pub async fn replace_admin_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
    Json(payload): Json<ReplacePermissionsRequest>,
) -> ApiResult<Json<AdminPermissionsResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let permissions = state
        .permission_service
        .replace_permissions(&principal, admin_id, payload.into_permission_set()?)
        .await?;

    Ok(Json(permissions.into()))
}
