use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use taskboard_core::models::{
    Label, LabelPatch, NewLabel, NewTask, NewTaskStatus, NewUser, Task, TaskFilter, TaskPatch,
    TaskStatus, TaskStatusPatch, User, UserPatch,
};
use taskboard_core::patch::Patch;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(example = "2024-10-20")]
    pub created_at: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(body: CreateUserRequest) -> Self {
        NewUser {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        }
    }
}

/// Partial update: absent keys are left unchanged, `null` clears nullable fields.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub password: Patch<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(body: UpdateUserRequest) -> Self {
        UserPatch {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        }
    }
}

// ---------------------------------------------------------------------------
// Task statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[schema(example = "2024-10-20")]
    pub created_at: NaiveDate,
}

impl From<TaskStatus> for TaskStatusResponse {
    fn from(status: TaskStatus) -> Self {
        Self {
            id: status.id,
            name: status.name,
            slug: status.slug,
            created_at: status.created_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTaskStatusRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl From<CreateTaskStatusRequest> for NewTaskStatus {
    fn from(body: CreateTaskStatusRequest) -> Self {
        NewTaskStatus {
            name: body.name,
            slug: body.slug,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateTaskStatusRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub slug: Patch<String>,
}

impl From<UpdateTaskStatusRequest> for TaskStatusPatch {
    fn from(body: UpdateTaskStatusRequest) -> Self {
        TaskStatusPatch {
            name: body.name,
            slug: body.slug,
        }
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    pub id: i64,
    pub name: String,
    #[schema(example = "2024-10-20")]
    pub created_at: NaiveDate,
}

impl From<Label> for LabelResponse {
    fn from(label: Label) -> Self {
        Self {
            id: label.id,
            name: label.name,
            created_at: label.created_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateLabelRequest {
    #[serde(default)]
    pub name: String,
}

impl From<CreateLabelRequest> for NewLabel {
    fn from(body: CreateLabelRequest) -> Self {
        NewLabel { name: body.name }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateLabelRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
}

impl From<UpdateLabelRequest> for LabelPatch {
    fn from(body: UpdateLabelRequest) -> Self {
        LabelPatch { name: body.name }
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub index: Option<i32>,
    pub title: String,
    pub content: Option<String>,
    /// Status slug.
    pub status: String,
    #[serde(rename = "assignee_id")]
    pub assignee_id: Option<i64>,
    pub task_label_ids: Vec<i64>,
    #[schema(example = "2024-10-20")]
    pub created_at: NaiveDate,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            index: task.index,
            title: task.name,
            content: task.description,
            status: task.status,
            assignee_id: task.assignee_id,
            task_label_ids: task.label_ids,
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub index: Option<i32>,
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
    /// Status slug.
    #[serde(default)]
    pub status: String,
    /// `0` is treated as unassigned.
    #[serde(rename = "assignee_id")]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub task_label_ids: Vec<i64>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(body: CreateTaskRequest) -> Self {
        NewTask {
            title: body.title,
            status: body.status,
            index: body.index,
            content: body.content,
            assignee_id: body.assignee_id.filter(|id| *id != 0),
            label_ids: body.task_label_ids,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub index: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub content: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Patch<String>,
    #[serde(default, rename = "assignee_id")]
    #[schema(value_type = Option<i64>)]
    pub assignee_id: Patch<i64>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<i64>>)]
    pub task_label_ids: Patch<Vec<i64>>,
}

impl From<UpdateTaskRequest> for TaskPatch {
    fn from(body: UpdateTaskRequest) -> Self {
        let assignee_id = match body.assignee_id {
            Patch::Value(0) => Patch::Null,
            other => other,
        };
        TaskPatch {
            title: body.title,
            status: body.status,
            index: body.index,
            content: body.content,
            assignee_id,
            label_ids: body.task_label_ids,
        }
    }
}

/// Task list filters. Empty values and `0` ids are ignored.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    /// Substring of the task title.
    pub title_cont: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub assignee_id: Option<i64>,
    /// Status slug.
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub label_id: Option<i64>,
}

impl From<TaskListQuery> for TaskFilter {
    fn from(query: TaskListQuery) -> Self {
        TaskFilter {
            title_cont: query.title_cont,
            assignee_id: query.assignee_id,
            status: query.status,
            label_id: query.label_id,
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// User e-mail.
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
