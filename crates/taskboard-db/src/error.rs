use taskboard_core::AppError;

/// SQLSTATE `string_data_right_truncation`.
const VALUE_TOO_LONG: &str = "22001";

/// Map a failed INSERT/UPDATE. Constraint violations become client errors.
pub(crate) fn write_error(e: sqlx::Error, entity: &str) -> AppError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            AppError::AlreadyExists(format!("{entity} already exists"))
        }
        Some(db) if db.is_foreign_key_violation() => {
            AppError::InvalidReference(format!("{entity} references a missing record"))
        }
        Some(db) if db.code().as_deref() == Some(VALUE_TOO_LONG) => {
            AppError::ValidationError(format!("{entity} has a value that is too long"))
        }
        _ => AppError::DatabaseError(e.to_string()),
    }
}

/// Map a failed DELETE. A foreign-key violation means a task still points here.
pub(crate) fn delete_error(e: sqlx::Error, entity: &str) -> AppError {
    match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => {
            AppError::InUse(format!("{entity} is referenced by tasks and cannot be deleted"))
        }
        _ => AppError::DatabaseError(e.to_string()),
    }
}
