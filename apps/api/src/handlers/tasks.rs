use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use switchboard_application::CreateTaskParams;
use switchboard_domain::{Principal, TaskId};

use crate::dto::{CreateTaskRequest, ListTasksQuery, TaskResponse, TransitionTaskRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let status = query.status()?;
    let (limit, offset) = query.page();
    let tasks = state
        .task_service
        .list_tasks(&principal, status, limit, offset)
        .await?
        .into_iter()
        .map(TaskResponse::from)
        .collect();

    Ok(Json(tasks))
}

pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let assigned_to = payload.assignee()?;
    let due_at = payload.due_at()?;
    let task = state
        .task_service
        .create_task(
            &principal,
            CreateTaskParams {
                title: payload.title,
                description: payload.description,
                assigned_to,
                due_at,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn get_task_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = TaskId::parse(task_id.as_str())?;
    let task = state.task_service.get_task(&principal, task_id).await?;

    Ok(Json(task.into()))
}

/// POST /api/tasks/{id}/transition - Drives the task lifecycle.
pub async fn transition_task_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(task_id): Path<String>,
    Json(payload): Json<TransitionTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = TaskId::parse(task_id.as_str())?;
    let task = state
        .task_service
        .transition_task(&principal, task_id, payload.into_transition()?)
        .await?;

    Ok(Json(task.into()))
}

pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(task_id): Path<String>,
) -> ApiResult<StatusCode> {
    let task_id = TaskId::parse(task_id.as_str())?;
    state.task_service.delete_task(&principal, task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
