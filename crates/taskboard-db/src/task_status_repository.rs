use chrono::NaiveDate;
use sqlx::{PgPool, Pool, Postgres};
use taskboard_core::error::AppError;
use taskboard_core::models::{TaskStatus, TaskStatusDraft};

use crate::error::{delete_error, write_error};

/// Repository for task statuses in PostgreSQL.
#[derive(Clone)]
pub struct TaskStatusRepository {
    pool: Pool<Postgres>,
}

impl TaskStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TaskStatus>, AppError> {
        let rows = sqlx::query_as::<_, TaskStatusRow>(
            "SELECT id, name, slug, created_at FROM task_statuses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<TaskStatus>, AppError> {
        let row = sqlx::query_as::<_, TaskStatusRow>(
            "SELECT id, name, slug, created_at FROM task_statuses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<TaskStatus>, AppError> {
        let row = sqlx::query_as::<_, TaskStatusRow>(
            "SELECT id, name, slug, created_at FROM task_statuses WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM task_statuses WHERE slug = $1)", slug)
            .await
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM task_statuses WHERE name = $1)", name)
            .await
    }

    pub async fn insert(&self, draft: &TaskStatusDraft) -> Result<TaskStatus, AppError> {
        let row = sqlx::query_as::<_, TaskStatusRow>(
            r#"
            INSERT INTO task_statuses (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, created_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Task status"))?;

        Ok(row.into())
    }

    pub async fn update(
        &self,
        id: i64,
        draft: &TaskStatusDraft,
    ) -> Result<Option<TaskStatus>, AppError> {
        let row = sqlx::query_as::<_, TaskStatusRow>(
            r#"
            UPDATE task_statuses
            SET name = $2, slug = $3
            WHERE id = $1
            RETURNING id, name, slug, created_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Task status"))?;

        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM task_statuses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, "Task status"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tasks WHERE task_status_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(exists)
    }

    async fn exists(&self, sql: &str, value: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(exists)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct TaskStatusRow {
    id: i64,
    name: String,
    slug: String,
    created_at: NaiveDate,
}

impl From<TaskStatusRow> for TaskStatus {
    fn from(row: TaskStatusRow) -> Self {
        TaskStatus {
            id: row.id,
            name: row.name,
            slug: row.slug,
            created_at: row.created_at,
        }
    }
}

// -- Trait implementation --

impl taskboard_core::traits::TaskStatusStore for TaskStatusRepository {
    async fn list(&self) -> Result<Vec<TaskStatus>, AppError> {
        TaskStatusRepository::list(self).await
    }

    async fn get(&self, id: i64) -> Result<Option<TaskStatus>, AppError> {
        TaskStatusRepository::get(self, id).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TaskStatus>, AppError> {
        TaskStatusRepository::find_by_slug(self, slug).await
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        TaskStatusRepository::slug_exists(self, slug).await
    }

    async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        TaskStatusRepository::name_exists(self, name).await
    }

    async fn insert(&self, draft: &TaskStatusDraft) -> Result<TaskStatus, AppError> {
        TaskStatusRepository::insert(self, draft).await
    }

    async fn update(
        &self,
        id: i64,
        draft: &TaskStatusDraft,
    ) -> Result<Option<TaskStatus>, AppError> {
        TaskStatusRepository::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        TaskStatusRepository::delete(self, id).await
    }

    async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        TaskStatusRepository::is_referenced(self, id).await
    }
}
