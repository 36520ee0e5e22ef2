use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;

use crate::dto::LoginRequest;
use crate::error::{ApiError, JsonBody};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed JWT", body = String, content_type = "text/plain"),
        (status = 401, description = "Invalid credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users()
        .authenticate(&body.username, &body.password)
        .await?;
    let token = state.tokens.issue(&user.email)?;
    tracing::info!(user_id = user.id, "Token issued");
    Ok(token)
}
