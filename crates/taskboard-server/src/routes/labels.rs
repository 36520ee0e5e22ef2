use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::dto::{CreateLabelRequest, LabelResponse, UpdateLabelRequest};
use crate::error::{ApiError, JsonBody, PathParam};
use crate::routes::counted;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/labels",
    responses(
        (status = 200, description = "All labels", body = Vec<LabelResponse>,
            headers(("X-Total-Count" = usize, description = "Number of labels"))),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "labels"
)]
pub async fn list_labels(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let labels = state.labels().list().await?;
    Ok(counted(
        labels.into_iter().map(LabelResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/labels/{id}",
    params(("id" = i64, Path, description = "Label ID")),
    responses(
        (status = 200, description = "Label details", body = LabelResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "labels"
)]
pub async fn get_label(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let label = state.labels().get(id).await?;
    Ok(axum::Json(LabelResponse::from(label)))
}

#[utoipa::path(
    post,
    path = "/api/labels",
    request_body = CreateLabelRequest,
    responses(
        (status = 201, description = "Label created", body = LabelResponse),
        (status = 400, description = "Invalid name or duplicate", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "labels"
)]
pub async fn create_label(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateLabelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let label = state.labels().create(body.into()).await?;
    Ok((StatusCode::CREATED, axum::Json(LabelResponse::from(label))))
}

#[utoipa::path(
    put,
    path = "/api/labels/{id}",
    params(("id" = i64, Path, description = "Label ID")),
    request_body = UpdateLabelRequest,
    responses(
        (status = 200, description = "Label updated", body = LabelResponse),
        (status = 400, description = "Invalid name or duplicate", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "labels"
)]
pub async fn update_label(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(body): JsonBody<UpdateLabelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let label = state.labels().update(id, body.into()).await?;
    Ok(axum::Json(LabelResponse::from(label)))
}

#[utoipa::path(
    delete,
    path = "/api/labels/{id}",
    params(("id" = i64, Path, description = "Label ID")),
    responses(
        (status = 204, description = "Label deleted (or already absent)"),
        (status = 409, description = "Label is attached to tasks", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "labels"
)]
pub async fn delete_label(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.labels().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
