use chrono::NaiveDate;
use sqlx::{PgPool, Pool, Postgres};
use taskboard_core::error::AppError;
use taskboard_core::models::{User, UserDraft, UserRecord};

use crate::error::{delete_error, write_error};

/// Repository for users in PostgreSQL.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, password_digest, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|row| UserRecord::from(row).user).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, password_digest, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, password_digest, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(exists)
    }

    pub async fn insert(&self, draft: &UserDraft) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_digest)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, password_digest, created_at, updated_at
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "User"))?;

        Ok(UserRecord::from(row).user)
    }

    pub async fn update(&self, id: i64, draft: &UserDraft) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                email = $4,
                password_digest = $5,
                updated_at = CURRENT_DATE
            WHERE id = $1
            RETURNING id, first_name, last_name, email, password_digest, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.password_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "User"))?;

        Ok(row.map(|row| UserRecord::from(row).user))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, "User"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tasks WHERE assignee_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(exists)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: String,
    password_digest: String,
    created_at: NaiveDate,
    updated_at: NaiveDate,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            user: User {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            password_digest: row.password_digest,
        }
    }
}

// -- Trait implementation --

impl taskboard_core::traits::UserStore for UserRepository {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        UserRepository::list(self).await
    }

    async fn get(&self, id: i64) -> Result<Option<UserRecord>, AppError> {
        UserRepository::get(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        UserRepository::find_by_email(self, email).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        UserRepository::email_exists(self, email).await
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, AppError> {
        UserRepository::insert(self, draft).await
    }

    async fn update(&self, id: i64, draft: &UserDraft) -> Result<Option<User>, AppError> {
        UserRepository::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        UserRepository::delete(self, id).await
    }

    async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        UserRepository::is_referenced(self, id).await
    }
}
