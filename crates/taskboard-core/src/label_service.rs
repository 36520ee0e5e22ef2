use crate::error::AppError;
use crate::models::{Label, LabelDraft, LabelPatch, NewLabel};
use crate::traits::LabelStore;
use crate::validation::validate_label_name;

#[derive(Clone)]
pub struct LabelService<L> {
    labels: L,
}

impl<L: LabelStore> LabelService<L> {
    pub fn new(labels: L) -> Self {
        Self { labels }
    }

    pub async fn list(&self) -> Result<Vec<Label>, AppError> {
        self.labels.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Label, AppError> {
        self.labels.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Label, AppError> {
        self.labels
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Label with name {name} not found")))
    }

    #[tracing::instrument(skip(self, data), fields(name = %data.name))]
    pub async fn create(&self, data: NewLabel) -> Result<Label, AppError> {
        validate_label_name(&data.name)?;
        self.ensure_name_free(&data.name).await?;

        self.labels.insert(&LabelDraft { name: data.name }).await
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: LabelPatch) -> Result<Label, AppError> {
        let current = self.get(id).await?;
        let mut draft = LabelDraft {
            name: current.name.clone(),
        };

        if patch.name.apply_required("Name", &mut draft.name)? {
            validate_label_name(&draft.name)?;
            if draft.name != current.name {
                self.ensure_name_free(&draft.name).await?;
            }
        }

        self.labels
            .update(id, &draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.labels.is_referenced(id).await? {
            return Err(AppError::InUse(format!(
                "Label with id {id} is attached to tasks and cannot be deleted"
            )));
        }
        self.labels.delete(id).await?;
        Ok(())
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        self.labels.name_exists(name).await
    }

    async fn ensure_name_free(&self, name: &str) -> Result<(), AppError> {
        if self.labels.name_exists(name).await? {
            return Err(AppError::AlreadyExists(format!(
                "Label with name {name} already exists"
            )));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Label with id {id} not found"))
}
