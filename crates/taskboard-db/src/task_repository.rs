use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor, PgPool, Pool, Postgres};
use taskboard_core::error::AppError;
use taskboard_core::models::{Task, TaskDraft, TaskFilter};

use crate::error::write_error;

/// Tasks joined with their status slug and sorted label ids.
const TASK_SELECT: &str = r#"
    SELECT t.id, t.name, t."index", t.description, t.task_status_id,
           s.slug AS status, t.assignee_id,
           ARRAY(
               SELECT lt.label_id FROM label_task lt
               WHERE lt.task_id = t.id
               ORDER BY lt.label_id
           ) AS label_ids,
           t.created_at
    FROM tasks t
    JOIN task_statuses s ON s.id = t.task_status_id
"#;

/// Repository for tasks and their label links in PostgreSQL.
#[derive(Clone)]
pub struct TaskRepository {
    pool: Pool<Postgres>,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tasks matching every set filter field, ordered by id.
    ///
    /// The label filter only selects tasks; each returned task still
    /// carries its full label set.
    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            r#"{TASK_SELECT}
            WHERE ($1::text IS NULL OR strpos(t.name, $1) > 0)
              AND ($2::bigint IS NULL OR t.assignee_id = $2)
              AND ($3::text IS NULL OR s.slug = $3)
              AND ($4::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM label_task f
                    WHERE f.task_id = t.id AND f.label_id = $4
                  ))
            ORDER BY t.id
            "#
        );

        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(&filter.title_cont)
            .bind(filter.assignee_id)
            .bind(&filter.status)
            .bind(filter.label_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Task>, AppError> {
        fetch_task(&self.pool, id).await
    }

    /// Insert the task row and its label links in one transaction.
    pub async fn insert(&self, draft: &TaskDraft) -> Result<Task, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tasks (name, "index", description, task_status_id, assignee_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(draft.index)
        .bind(&draft.description)
        .bind(draft.task_status_id)
        .bind(draft.assignee_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error(e, "Task"))?;

        replace_labels(&mut *tx, id, &draft.label_ids).await?;

        let task = fetch_task(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::DatabaseError(format!("Task {id} missing after insert")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::debug!(task_id = id, labels = task.label_ids.len(), "Task row inserted");
        Ok(task)
    }

    /// Overwrite the task row and replace its label set in one transaction.
    pub async fn update(&self, id: i64, draft: &TaskDraft) -> Result<Option<Task>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let updated: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE tasks
            SET name = $2,
                "index" = $3,
                description = $4,
                task_status_id = $5,
                assignee_id = $6
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(draft.index)
        .bind(&draft.description)
        .bind(draft.task_status_id)
        .bind(draft.assignee_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| write_error(e, "Task"))?;

        if updated.is_none() {
            return Ok(None);
        }

        replace_labels(&mut *tx, id, &draft.label_ids).await?;
        let task = fetch_task(&mut *tx, id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(task)
    }

    /// Label links go with the task (`ON DELETE CASCADE`).
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

async fn fetch_task<'e, E>(executor: E, id: i64) -> Result<Option<Task>, AppError>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{TASK_SELECT} WHERE t.id = $1");
    let row = sqlx::query_as::<_, TaskRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(row.map(Into::into))
}

async fn replace_labels(
    conn: &mut PgConnection,
    task_id: i64,
    label_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM label_task WHERE task_id = $1")
        .bind(task_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if label_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO label_task (task_id, label_id)
        SELECT $1, label_id FROM unnest($2::bigint[]) AS label_id
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(task_id)
    .bind(label_ids)
    .execute(&mut *conn)
    .await
    .map_err(|e| write_error(e, "Task label"))?;

    Ok(())
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    name: String,
    index: Option<i32>,
    description: Option<String>,
    task_status_id: i64,
    status: String,
    assignee_id: Option<i64>,
    label_ids: Vec<i64>,
    created_at: NaiveDate,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            name: row.name,
            index: row.index,
            description: row.description,
            task_status_id: row.task_status_id,
            status: row.status,
            assignee_id: row.assignee_id,
            label_ids: row.label_ids,
            created_at: row.created_at,
        }
    }
}

// -- Trait implementation --

impl taskboard_core::traits::TaskStore for TaskRepository {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        TaskRepository::list(self, filter).await
    }

    async fn get(&self, id: i64) -> Result<Option<Task>, AppError> {
        TaskRepository::get(self, id).await
    }

    async fn insert(&self, draft: &TaskDraft) -> Result<Task, AppError> {
        TaskRepository::insert(self, draft).await
    }

    async fn update(&self, id: i64, draft: &TaskDraft) -> Result<Option<Task>, AppError> {
        TaskRepository::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        TaskRepository::delete(self, id).await
    }
}
