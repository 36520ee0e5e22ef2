use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::dto::{CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest};
use crate::error::{ApiError, JsonBody, PathParam, QueryParams};
use crate::routes::counted;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Tasks matching every given filter", body = Vec<TaskResponse>,
            headers(("X-Total-Count" = usize, description = "Number of tasks"))),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "tasks"
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<TaskListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = state.tasks().list(query.into()).await?;
    Ok(counted(
        tasks.into_iter().map(TaskResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task details", body = TaskResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "tasks"
)]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let task = state.tasks().get(id).await?;
    Ok(axum::Json(TaskResponse::from(task)))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid data or unknown status, assignee or label", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task = state.tasks().create(body.into()).await?;
    Ok((StatusCode::CREATED, axum::Json(TaskResponse::from(task))))
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Invalid data or unknown status, assignee or label", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "tasks"
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(body): JsonBody<UpdateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task = state.tasks().update(id, body.into()).await?;
    Ok(axum::Json(TaskResponse::from(task)))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted (or already absent)"),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.tasks().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
