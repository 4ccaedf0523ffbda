use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use switchboard_domain::{ContentId, Principal};

use crate::dto::{ContentResponse, ListContentQuery, ModerateContentRequest, UpdateContentRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_content_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListContentQuery>,
) -> ApiResult<Json<Vec<ContentResponse>>> {
    let content = state
        .content_service
        .list_content(&principal, query.into_query()?)
        .await?
        .into_iter()
        .map(ContentResponse::from)
        .collect();

    Ok(Json(content))
}

pub async fn get_content_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(content_id): Path<String>,
) -> ApiResult<Json<ContentResponse>> {
    let content_id = ContentId::parse(content_id.as_str())?;
    let content = state
        .content_service
        .get_content(&principal, content_id)
        .await?;

    Ok(Json(content.into()))
}

pub async fn update_content_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(content_id): Path<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> ApiResult<Json<ContentResponse>> {
    let content_id = ContentId::parse(content_id.as_str())?;
    let content = state
        .content_service
        .update_content(&principal, content_id, payload.body, payload.media_url)
        .await?;

    Ok(Json(content.into()))
}

pub async fn moderate_content_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(content_id): Path<String>,
    Json(payload): Json<ModerateContentRequest>,
) -> ApiResult<Json<ContentResponse>> {
    let content_id = ContentId::parse(content_id.as_str())?;
    let decision = payload.decision()?;
    let content = state
        .content_service
        .moderate_content(&principal, content_id, decision, payload.notes)
        .await?;

    Ok(Json(content.into()))
}

pub async fn delete_content_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(content_id): Path<String>,
) -> ApiResult<StatusCode> {
    let content_id = ContentId::parse(content_id.as_str())?;
    state
        .content_service
        .delete_content(&principal, content_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
