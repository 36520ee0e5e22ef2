use std::future::Future;

use crate::error::AppError;
use crate::models::{
    Label, LabelDraft, Task, TaskDraft, TaskFilter, TaskStatus, TaskStatusDraft, User, UserDraft,
    UserRecord,
};

/// Persists and retrieves users.
pub trait UserStore: Send + Sync + Clone {
    /// All users ordered by id.
    fn list(&self) -> impl Future<Output = Result<Vec<User>, AppError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<UserRecord>, AppError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, AppError>> + Send;

    fn email_exists(&self, email: &str) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn insert(&self, draft: &UserDraft) -> impl Future<Output = Result<User, AppError>> + Send;

    /// Overwrite a user row. Returns `None` if the id does not exist.
    fn update(
        &self,
        id: i64,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Returns true if a row was removed.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// True while any task is assigned to this user.
    fn is_referenced(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists and retrieves task statuses.
pub trait TaskStatusStore: Send + Sync + Clone {
    fn list(&self) -> impl Future<Output = Result<Vec<TaskStatus>, AppError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<TaskStatus>, AppError>> + Send;

    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<TaskStatus>, AppError>> + Send;

    fn slug_exists(&self, slug: &str) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn name_exists(&self, name: &str) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn insert(
        &self,
        draft: &TaskStatusDraft,
    ) -> impl Future<Output = Result<TaskStatus, AppError>> + Send;

    fn update(
        &self,
        id: i64,
        draft: &TaskStatusDraft,
    ) -> impl Future<Output = Result<Option<TaskStatus>, AppError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// True while any task has this status.
    fn is_referenced(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists and retrieves labels.
pub trait LabelStore: Send + Sync + Clone {
    fn list(&self) -> impl Future<Output = Result<Vec<Label>, AppError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Label>, AppError>> + Send;

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Label>, AppError>> + Send;

    fn name_exists(&self, name: &str) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// The subset of `ids` that exist, sorted ascending.
    fn existing_ids(&self, ids: &[i64])
    -> impl Future<Output = Result<Vec<i64>, AppError>> + Send;

    fn insert(&self, draft: &LabelDraft) -> impl Future<Output = Result<Label, AppError>> + Send;

    fn update(
        &self,
        id: i64,
        draft: &LabelDraft,
    ) -> impl Future<Output = Result<Option<Label>, AppError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// True while any task carries this label.
    fn is_referenced(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists and retrieves tasks together with their label links.
pub trait TaskStore: Send + Sync + Clone {
    /// Tasks matching every set filter field, ordered by id.
    fn list(
        &self,
        filter: &TaskFilter,
    ) -> impl Future<Output = Result<Vec<Task>, AppError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Task>, AppError>> + Send;

    fn insert(&self, draft: &TaskDraft) -> impl Future<Output = Result<Task, AppError>> + Send;

    /// Overwrite a task row and replace its label set.
    fn update(
        &self,
        id: i64,
        draft: &TaskDraft,
    ) -> impl Future<Output = Result<Option<Task>, AppError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}
