use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::{ApiError, JsonBody, PathParam};
use crate::routes::counted;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>,
            headers(("X-Total-Count" = usize, description = "Number of users"))),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.users().list().await?;
    Ok(counted(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users().get(id).await?;
    Ok(axum::Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid data or e-mail taken", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users().create(body.into()).await?;
    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid data", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users().update(id, body.into()).await?;
    Ok(axum::Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted (or already absent)"),
        (status = 409, description = "User is assigned to tasks", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = []), ("basic" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.users().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
