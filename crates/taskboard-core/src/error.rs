use thiserror::Error;

/// Application-wide error types for Taskboard.
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A unique field (email, slug, name) is already taken.
    #[error("{0}")]
    AlreadyExists(String),

    /// Request data failed validation.
    #[error("{0}")]
    ValidationError(String),

    /// A referenced entity (status slug, assignee, label) does not exist.
    #[error("{0}")]
    InvalidReference(String),

    /// The entity is still referenced by a task and cannot be removed.
    #[error("{0}")]
    InUse(String),

    /// Missing or wrong credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Password hashing failed.
    #[error("Password error: {0}")]
    PasswordError(String),

    /// Token signing or decoding failed.
    #[error("Token error: {0}")]
    TokenError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the caller caused this error and can fix the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::AlreadyExists(_)
                | AppError::ValidationError(_)
                | AppError::InvalidReference(_)
                | AppError::InUse(_)
                | AppError::Unauthorized(_)
        )
    }
}
