use chrono::NaiveDate;
use sqlx::{PgPool, Pool, Postgres};
use taskboard_core::error::AppError;
use taskboard_core::models::{Label, LabelDraft};

use crate::error::{delete_error, write_error};

/// Repository for labels in PostgreSQL.
#[derive(Clone)]
pub struct LabelRepository {
    pool: Pool<Postgres>,
}

impl LabelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Label>, AppError> {
        let rows =
            sqlx::query_as::<_, LabelRow>("SELECT id, name, created_at FROM labels ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Label>, AppError> {
        let row =
            sqlx::query_as::<_, LabelRow>("SELECT id, name, created_at FROM labels WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Label>, AppError> {
        let row = sqlx::query_as::<_, LabelRow>(
            "SELECT id, name, created_at FROM labels WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM labels WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(exists)
    }

    /// The subset of `ids` present in the table, ascending.
    pub async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM labels WHERE id = ANY($1) ORDER BY id")
                .bind(ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn insert(&self, draft: &LabelDraft) -> Result<Label, AppError> {
        let row = sqlx::query_as::<_, LabelRow>(
            "INSERT INTO labels (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Label"))?;

        Ok(row.into())
    }

    pub async fn update(&self, id: i64, draft: &LabelDraft) -> Result<Option<Label>, AppError> {
        let row = sqlx::query_as::<_, LabelRow>(
            "UPDATE labels SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(id)
        .bind(&draft.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Label"))?;

        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, "Label"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM label_task WHERE label_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(exists)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct LabelRow {
    id: i64,
    name: String,
    created_at: NaiveDate,
}

impl From<LabelRow> for Label {
    fn from(row: LabelRow) -> Self {
        Label {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

// -- Trait implementation --

impl taskboard_core::traits::LabelStore for LabelRepository {
    async fn list(&self) -> Result<Vec<Label>, AppError> {
        LabelRepository::list(self).await
    }

    async fn get(&self, id: i64) -> Result<Option<Label>, AppError> {
        LabelRepository::get(self, id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Label>, AppError> {
        LabelRepository::find_by_name(self, name).await
    }

    async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        LabelRepository::name_exists(self, name).await
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        LabelRepository::existing_ids(self, ids).await
    }

    async fn insert(&self, draft: &LabelDraft) -> Result<Label, AppError> {
        LabelRepository::insert(self, draft).await
    }

    async fn update(&self, id: i64, draft: &LabelDraft) -> Result<Option<Label>, AppError> {
        LabelRepository::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        LabelRepository::delete(self, id).await
    }

    async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        LabelRepository::is_referenced(self, id).await
    }
}
