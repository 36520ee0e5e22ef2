use chrono::NaiveDate;
use serde::Serialize;

use crate::patch::Patch;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A registered user, without the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

/// A user together with the stored password digest, for authentication.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_digest: String,
}

/// Everything persisted for a user row, minus generated columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_digest: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub password: Patch<String>,
}

// ---------------------------------------------------------------------------
// Task statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatus {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusDraft {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskStatus {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct TaskStatusPatch {
    pub name: Patch<String>,
    pub slug: Patch<String>,
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDraft {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewLabel {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct LabelPatch {
    pub name: Patch<String>,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// A task as read back from storage, with its status slug resolved and its
/// label ids sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub index: Option<i32>,
    pub description: Option<String>,
    pub task_status_id: i64,
    pub status: String,
    pub assignee_id: Option<i64>,
    pub label_ids: Vec<i64>,
    pub created_at: NaiveDate,
}

/// Everything persisted for a task, with references already resolved to ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub index: Option<i32>,
    pub description: Option<String>,
    pub task_status_id: i64,
    pub assignee_id: Option<i64>,
    pub label_ids: Vec<i64>,
}

/// Task creation input, referencing the status by slug.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub status: String,
    pub index: Option<i32>,
    pub content: Option<String>,
    pub assignee_id: Option<i64>,
    pub label_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Patch<String>,
    pub status: Patch<String>,
    pub index: Patch<i32>,
    pub content: Patch<String>,
    pub assignee_id: Patch<i64>,
    pub label_ids: Patch<Vec<i64>>,
}

/// Optional task list filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Substring of the task title.
    pub title_cont: Option<String>,
    pub assignee_id: Option<i64>,
    /// Status slug.
    pub status: Option<String>,
    pub label_id: Option<i64>,
}

impl TaskFilter {
    /// Treat empty strings and zero ids as "no filter".
    pub fn normalized(self) -> Self {
        Self {
            title_cont: self.title_cont.filter(|s| !s.is_empty()),
            assignee_id: self.assignee_id.filter(|id| *id != 0),
            status: self.status.filter(|s| !s.is_empty()),
            label_id: self.label_id.filter(|id| *id != 0),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.title_cont
            .as_deref()
            .is_none_or(|needle| task.name.contains(needle))
            && self
                .assignee_id
                .is_none_or(|id| task.assignee_id == Some(id))
            && self.status.as_deref().is_none_or(|slug| task.status == slug)
            && self
                .label_id
                .is_none_or(|id| task.label_ids.contains(&id))
    }
}

/// Sort and deduplicate a list of label ids.
pub fn normalize_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
