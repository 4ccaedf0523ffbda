use super::*;

pub async fn approve_admin_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
) -> ApiResult<Json<AdminResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let admin = state
        .admin_service
        .approve_admin(&principal, admin_id)
        .await?;

    Ok(Json(admin.into()))
}

pub async fn disable_admin_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
) -> ApiResult<Json<AdminResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let admin = state
        .admin_service
        .disable_admin(&principal, admin_id)
        .await?;

    Ok(Json(admin.into()))
}

pub async fn delete_admin_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
) -> ApiResult<StatusCode> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    state.admin_service.delete_admin(&principal, admin_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
