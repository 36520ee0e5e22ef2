use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use serde::Serialize;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::require_auth;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod labels;
pub mod system;
pub mod task_statuses;
pub mod tasks;
pub mod users;

/// Total number of items in a list response.
pub const TOTAL_COUNT: &str = "x-total-count";

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/task_statuses", post(task_statuses::create_task_status))
        .route(
            "/api/task_statuses/{id}",
            put(task_statuses::update_task_status)
                .delete(task_statuses::delete_task_status),
        )
        .route(
            "/api/labels",
            get(labels::list_labels).post(labels::create_label),
        )
        .route(
            "/api/labels/{id}",
            get(labels::get_label)
                .put(labels::update_label)
                .delete(labels::delete_label),
        )
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/welcome", get(system::welcome))
        .route("/health", get(system::health))
        .route("/api/login", post(auth::login))
        .route("/api/task_statuses", get(task_statuses::list_task_statuses))
        .route("/api/task_statuses/{id}", get(task_statuses::get_task_status))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

/// JSON array response carrying an `X-Total-Count` header.
pub(crate) fn counted<T: Serialize>(items: Vec<T>) -> impl IntoResponse {
    let total = items.len().to_string();
    ([(TOTAL_COUNT, total)], axum::Json(items))
}
