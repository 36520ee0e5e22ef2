use crate::error::AppError;
use crate::models::{NewUser, User, UserDraft, UserPatch, UserRecord};
use crate::password::{hash_password, verify_password};
use crate::traits::UserStore;
use crate::validation::{validate_email, validate_password};

/// User management and credential checks.
#[derive(Clone)]
pub struct UserService<U> {
    users: U,
}

impl<U: UserStore> UserService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        Ok(self.find(id).await?.user)
    }

    #[tracing::instrument(skip(self, data), fields(email = %data.email))]
    pub async fn create(&self, data: NewUser) -> Result<User, AppError> {
        validate_email(&data.email)?;
        validate_password(&data.password)?;

        if self.users.email_exists(&data.email).await? {
            return Err(AppError::AlreadyExists(format!(
                "User with email {} already exists",
                data.email
            )));
        }

        let draft = UserDraft {
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password_digest: hash_password(&data.password)?,
        };

        let user = self.users.insert(&draft).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let current = self.find(id).await?;
        let mut draft = UserDraft {
            first_name: current.user.first_name,
            last_name: current.user.last_name,
            email: current.user.email.clone(),
            password_digest: current.password_digest,
        };

        patch.first_name.apply_nullable(&mut draft.first_name);
        patch.last_name.apply_nullable(&mut draft.last_name);

        if patch.email.apply_required("Email", &mut draft.email)? {
            validate_email(&draft.email)?;
            if draft.email != current.user.email && self.users.email_exists(&draft.email).await? {
                return Err(AppError::AlreadyExists(format!(
                    "User with email {} already exists",
                    draft.email
                )));
            }
        }

        let mut password = String::new();
        if patch.password.apply_required("Password", &mut password)? {
            validate_password(&password)?;
            draft.password_digest = hash_password(&password)?;
        }

        self.users
            .update(id, &draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Remove a user. Missing ids are ignored; users with assigned tasks are kept.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.users.is_referenced(id).await? {
            return Err(AppError::InUse(format!(
                "User with id {id} is assigned to tasks and cannot be deleted"
            )));
        }
        if self.users.delete(id).await? {
            tracing::info!(user_id = id, "User deleted");
        }
        Ok(())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        self.users.email_exists(email).await
    }

    /// Check an e-mail/password pair. Both an unknown e-mail and a wrong
    /// password yield the same `Unauthorized` error.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let record = self.users.find_by_email(email).await?.ok_or_else(invalid)?;
        if !verify_password(&record.password_digest, password) {
            return Err(invalid());
        }
        Ok(record.user)
    }

    async fn find(&self, id: i64) -> Result<UserRecord, AppError> {
        self.users.get(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User with id {id} not found"))
}
