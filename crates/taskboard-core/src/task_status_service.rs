use crate::error::AppError;
use crate::models::{NewTaskStatus, TaskStatus, TaskStatusDraft, TaskStatusPatch};
use crate::traits::TaskStatusStore;
use crate::validation::validate_not_blank;

#[derive(Clone)]
pub struct TaskStatusService<S> {
    statuses: S,
}

impl<S: TaskStatusStore> TaskStatusService<S> {
    pub fn new(statuses: S) -> Self {
        Self { statuses }
    }

    pub async fn list(&self) -> Result<Vec<TaskStatus>, AppError> {
        self.statuses.list().await
    }

    pub async fn get(&self, id: i64) -> Result<TaskStatus, AppError> {
        self.statuses.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<TaskStatus, AppError> {
        self.statuses.find_by_slug(slug).await?.ok_or_else(|| {
            AppError::NotFound(format!("Task status with slug {slug} not found"))
        })
    }

    #[tracing::instrument(skip(self, data), fields(slug = %data.slug))]
    pub async fn create(&self, data: NewTaskStatus) -> Result<TaskStatus, AppError> {
        validate_not_blank("Name", &data.name)?;
        validate_not_blank("Slug", &data.slug)?;

        self.ensure_slug_free(&data.slug).await?;
        self.ensure_name_free(&data.name).await?;

        let draft = TaskStatusDraft {
            name: data.name,
            slug: data.slug,
        };
        self.statuses.insert(&draft).await
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: TaskStatusPatch) -> Result<TaskStatus, AppError> {
        let current = self.get(id).await?;
        let mut draft = TaskStatusDraft {
            name: current.name.clone(),
            slug: current.slug.clone(),
        };

        if patch.name.apply_required("Name", &mut draft.name)? {
            validate_not_blank("Name", &draft.name)?;
            if draft.name != current.name {
                self.ensure_name_free(&draft.name).await?;
            }
        }

        if patch.slug.apply_required("Slug", &mut draft.slug)? {
            validate_not_blank("Slug", &draft.slug)?;
            if draft.slug != current.slug {
                self.ensure_slug_free(&draft.slug).await?;
            }
        }

        self.statuses
            .update(id, &draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.statuses.is_referenced(id).await? {
            return Err(AppError::InUse(format!(
                "Task status with id {id} is used by tasks and cannot be deleted"
            )));
        }
        self.statuses.delete(id).await?;
        Ok(())
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        self.statuses.slug_exists(slug).await
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        self.statuses.name_exists(name).await
    }

    async fn ensure_slug_free(&self, slug: &str) -> Result<(), AppError> {
        if self.statuses.slug_exists(slug).await? {
            return Err(AppError::AlreadyExists(format!(
                "Task status with slug {slug} already exists"
            )));
        }
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str) -> Result<(), AppError> {
        if self.statuses.name_exists(name).await? {
            return Err(AppError::AlreadyExists(format!(
                "Task status with name {name} already exists"
            )));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Task status with id {id} not found"))
}
