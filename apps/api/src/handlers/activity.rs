use axum::Json;
use axum::extract::{Extension, Query, State};
use switchboard_domain::Principal;

use crate::dto::{ActivityEntryResponse, ListActivityQuery};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_activity_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListActivityQuery>,
) -> ApiResult<Json<Vec<ActivityEntryResponse>>> {
    let entries = state
        .activity_log_service
        .list(&principal, query.into_query()?)
        .await?
        .into_iter()
        .map(ActivityEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
