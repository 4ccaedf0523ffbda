use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use switchboard_application::{CreateEndUserParams, UpdateEndUserParams};
use switchboard_domain::{EndUserId, EndUserStatus, Principal};

use crate::dto::{
    AssignEndUserRequest, CreateEndUserRequest, EndUserResponse, ListEndUsersQuery,
    UpdateEndUserRequest, UpdateEndUserStatusRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_end_users_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListEndUsersQuery>,
) -> ApiResult<Json<Vec<EndUserResponse>>> {
    let end_users = state
        .end_user_service
        .list_end_users(&principal, query.into_query()?)
        .await?
        .into_iter()
        .map(EndUserResponse::from)
        .collect();

    Ok(Json(end_users))
}

pub async fn get_end_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(end_user_id): Path<String>,
) -> ApiResult<Json<EndUserResponse>> {
    let end_user_id = EndUserId::parse(end_user_id.as_str())?;
    let end_user = state
        .end_user_service
        .get_end_user(&principal, end_user_id)
        .await?;

    Ok(Json(end_user.into()))
}

pub async fn create_end_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateEndUserRequest>,
) -> ApiResult<(StatusCode, Json<EndUserResponse>)> {
    let assigned_to = payload.assignee()?;
    let end_user = state
        .end_user_service
        .create_end_user(
            &principal,
            CreateEndUserParams {
                username: payload.username,
                email: payload.email,
                display_name: payload.display_name,
                bio: payload.bio,
                assigned_to,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(end_user.into())))
}

pub async fn update_end_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(end_user_id): Path<String>,
    Json(payload): Json<UpdateEndUserRequest>,
) -> ApiResult<Json<EndUserResponse>> {
    let end_user_id = EndUserId::parse(end_user_id.as_str())?;
    let end_user = state
        .end_user_service
        .update_end_user(
            &principal,
            end_user_id,
            UpdateEndUserParams {
                email: payload.email,
                display_name: payload.display_name,
                bio: payload.bio,
            },
        )
        .await?;

    Ok(Json(end_user.into()))
}

pub async fn update_end_user_status_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(end_user_id): Path<String>,
    Json(payload): Json<UpdateEndUserStatusRequest>,
) -> ApiResult<Json<EndUserResponse>> {
    let end_user_id = EndUserId::parse(end_user_id.as_str())?;
    let status = payload.status.trim().parse::<EndUserStatus>()?;
    let end_user = state
        .end_user_service
        .set_end_user_status(&principal, end_user_id, status)
        .await?;

    Ok(Json(end_user.into()))
}

pub async fn assign_end_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(end_user_id): Path<String>,
    Json(payload): Json<AssignEndUserRequest>,
) -> ApiResult<Json<EndUserResponse>> {
    let end_user_id = EndUserId::parse(end_user_id.as_str())?;
    let end_user = state
        .end_user_service
        .assign_end_user(&principal, end_user_id, payload.assignee()?)
        .await?;

    Ok(Json(end_user.into()))
}

pub async fn delete_end_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(end_user_id): Path<String>,
) -> ApiResult<StatusCode> {
    let end_user_id = EndUserId::parse(end_user_id.as_str())?;
    state
        .end_user_service
        .delete_end_user(&principal, end_user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
