use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Task management: users, task statuses, labels, and tasks."
    ),
    paths(
        crate::routes::auth::login,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::task_statuses::list_task_statuses,
        crate::routes::task_statuses::get_task_status,
        crate::routes::task_statuses::create_task_status,
        crate::routes::task_statuses::update_task_status,
        crate::routes::task_statuses::delete_task_status,
        crate::routes::labels::list_labels,
        crate::routes::labels::get_label,
        crate::routes::labels::create_label,
        crate::routes::labels::update_label,
        crate::routes::labels::delete_label,
        crate::routes::tasks::list_tasks,
        crate::routes::tasks::get_task,
        crate::routes::tasks::create_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::delete_task,
        crate::routes::system::health,
    ),
    components(schemas(
        crate::dto::LoginRequest,
        crate::dto::UserResponse,
        crate::dto::CreateUserRequest,
        crate::dto::UpdateUserRequest,
        crate::dto::TaskStatusResponse,
        crate::dto::CreateTaskStatusRequest,
        crate::dto::UpdateTaskStatusRequest,
        crate::dto::LabelResponse,
        crate::dto::CreateLabelRequest,
        crate::dto::UpdateLabelRequest,
        crate::dto::TaskResponse,
        crate::dto::CreateTaskRequest,
        crate::dto::UpdateTaskRequest,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "users", description = "User management"),
        (name = "task_statuses", description = "Task status management"),
        (name = "labels", description = "Label management"),
        (name = "tasks", description = "Task management and filtering"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer (JWT) and Basic security schemes to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by POST /api/login."))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("User e-mail and password."))
                        .build(),
                ),
            );
        }
    }
}
