use crate::error::AppError;
use crate::models::{NewTask, Task, TaskDraft, TaskFilter, TaskPatch, normalize_ids};
use crate::traits::{LabelStore, TaskStatusStore, TaskStore, UserStore};
use crate::validation::validate_not_blank;

/// Task management. Resolves the status slug, the assignee and the labels a
/// request refers to before anything is written.
#[derive(Clone)]
pub struct TaskService<T, S, U, L> {
    tasks: T,
    statuses: S,
    users: U,
    labels: L,
}

impl<T, S, U, L> TaskService<T, S, U, L>
where
    T: TaskStore,
    S: TaskStatusStore,
    U: UserStore,
    L: LabelStore,
{
    pub fn new(tasks: T, statuses: S, users: U, labels: L) -> Self {
        Self {
            tasks,
            statuses,
            users,
            labels,
        }
    }

    pub async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        self.tasks.list(&filter.normalized()).await
    }

    pub async fn get(&self, id: i64) -> Result<Task, AppError> {
        self.tasks.get(id).await?.ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self, data), fields(status = %data.status))]
    pub async fn create(&self, data: NewTask) -> Result<Task, AppError> {
        validate_not_blank("Title", &data.title)?;
        validate_not_blank("Status", &data.status)?;

        let draft = TaskDraft {
            name: data.title,
            index: data.index,
            description: data.content,
            task_status_id: self.resolve_status(&data.status).await?,
            assignee_id: self.resolve_assignee(data.assignee_id).await?,
            label_ids: self.resolve_labels(&data.label_ids).await?,
        };

        let task = self.tasks.insert(&draft).await?;
        tracing::info!(task_id = task.id, "Task created");
        Ok(task)
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task, AppError> {
        let current = self.get(id).await?;
        let mut draft = TaskDraft {
            name: current.name,
            index: current.index,
            description: current.description,
            task_status_id: current.task_status_id,
            assignee_id: current.assignee_id,
            label_ids: current.label_ids,
        };

        if patch.title.apply_required("Title", &mut draft.name)? {
            validate_not_blank("Title", &draft.name)?;
        }

        let mut slug = current.status;
        if patch.status.apply_required("Status", &mut slug)? {
            validate_not_blank("Status", &slug)?;
            draft.task_status_id = self.resolve_status(&slug).await?;
        }

        patch.index.apply_nullable(&mut draft.index);
        patch.content.apply_nullable(&mut draft.description);

        if !patch.assignee_id.is_missing() {
            draft.assignee_id = self
                .resolve_assignee(patch.assignee_id.into_option())
                .await?;
        }

        if !patch.label_ids.is_missing() {
            let ids = patch.label_ids.into_option().unwrap_or_default();
            draft.label_ids = self.resolve_labels(&ids).await?;
        }

        self.tasks
            .update(id, &draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.tasks.delete(id).await? {
            tracing::info!(task_id = id, "Task deleted");
        }
        Ok(())
    }

    async fn resolve_status(&self, slug: &str) -> Result<i64, AppError> {
        self.statuses
            .find_by_slug(slug)
            .await?
            .map(|status| status.id)
            .ok_or_else(|| {
                AppError::InvalidReference(format!("Task status with slug {slug} not found"))
            })
    }

    async fn resolve_assignee(&self, assignee_id: Option<i64>) -> Result<Option<i64>, AppError> {
        let Some(id) = assignee_id else {
            return Ok(None);
        };
        match self.users.get(id).await? {
            Some(_) => Ok(Some(id)),
            None => Err(AppError::InvalidReference(format!(
                "User with id {id} not found"
            ))),
        }
    }

    async fn resolve_labels(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let wanted = normalize_ids(ids);
        if wanted.is_empty() {
            return Ok(wanted);
        }

        let existing = self.labels.existing_ids(&wanted).await?;
        if let Some(missing) = wanted.iter().find(|id| !existing.contains(id)) {
            return Err(AppError::InvalidReference(format!(
                "Label with id {missing} not found"
            )));
        }
        Ok(wanted)
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Task with id {id} not found"))
}
