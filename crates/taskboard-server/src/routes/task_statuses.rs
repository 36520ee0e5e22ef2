use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::dto::{CreateTaskStatusRequest, TaskStatusResponse, UpdateTaskStatusRequest};
use crate::error::{ApiError, JsonBody, PathParam};
use crate::routes::counted;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/task_statuses",
    responses(
        (status = 200, description = "All task statuses", body = Vec<TaskStatusResponse>,
            headers(("X-Total-Count" = usize, description = "Number of statuses"))),
    ),
    tag = "task_statuses"
)]
pub async fn list_task_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let statuses = state.task_statuses().list().await?;
    Ok(counted(
        statuses.into_iter().map(TaskStatusResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/task_statuses/{id}",
    params(("id" = i64, Path, description = "Task status ID")),
    responses(
        (status = 200, description = "Task status details", body = TaskStatusResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "task_statuses"
)]
pub async fn get_task_status(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.task_statuses().get(id).await?;
    Ok(axum::Json(TaskStatusResponse::from(status)))
}

#[utoipa::path(
    post,
    path = "/api/task_statuses",
    request_body = CreateTaskStatusRequest,
    responses(
        (status = 201, description = "Task status created", body = TaskStatusResponse),
        (status = 400, description = "Invalid data or duplicate", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "task_statuses"
)]
pub async fn create_task_status(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateTaskStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.task_statuses().create(body.into()).await?;
    Ok((StatusCode::CREATED, axum::Json(TaskStatusResponse::from(status))))
}

#[utoipa::path(
    put,
    path = "/api/task_statuses/{id}",
    params(("id" = i64, Path, description = "Task status ID")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Task status updated", body = TaskStatusResponse),
        (status = 400, description = "Invalid data or duplicate", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "task_statuses"
)]
pub async fn update_task_status(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(body): JsonBody<UpdateTaskStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.task_statuses().update(id, body.into()).await?;
    Ok(axum::Json(TaskStatusResponse::from(status)))
}

#[utoipa::path(
    delete,
    path = "/api/task_statuses/{id}",
    params(("id" = i64, Path, description = "Task status ID")),
    responses(
        (status = 204, description = "Task status deleted (or already absent)"),
        (status = 409, description = "Status is used by tasks", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "task_statuses"
)]
pub async fn delete_task_status(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.task_statuses().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
