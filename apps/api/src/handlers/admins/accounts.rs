use super::*;

pub async fn list_admins_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListAdminsQuery>,
) -> ApiResult<Json<Vec<AdminResponse>>> {
    let query = AdminAccountQuery::try_from(query)?;
    let admins = state
        .admin_service
        .list_admins(&principal, query)
        .await?
        .into_iter()
        .map(AdminResponse::from)
        .collect();

    Ok(Json(admins))
}

pub async fn get_admin_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
) -> ApiResult<Json<AdminResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let admin = state.admin_service.get_admin(&principal, admin_id).await?;

    Ok(Json(admin.into()))
}

pub async fn create_admin_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateAdminRequest>,
) -> ApiResult<(StatusCode, Json<AdminResponse>)> {
    let admin = state
        .admin_service
        .create_admin(&principal, payload.into_params()?)
        .await?;

    Ok((StatusCode::CREATED, Json(admin.into())))
}

pub async fn update_admin_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
    Json(payload): Json<UpdateAdminRequest>,
) -> ApiResult<Json<AdminResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let admin = state
        .admin_service
        .update_admin(&principal, admin_id, payload.into_params()?)
        .await?;

    Ok(Json(admin.into()))
}

pub async fn update_admin_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
    Json(payload): Json<UpdateAdminRoleRequest>,
) -> ApiResult<Json<AdminResponse>> {
    let admin_id = AdminUserId::parse(admin_id.as_str())?;
    let admin = state
        .admin_service
        .update_admin(&principal, admin_id, payload.into_params()?)
        .await?;

    Ok(Json(admin.into()))
}
