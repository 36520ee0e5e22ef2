use crate::error::AppError;

pub const PASSWORD_MIN_LENGTH: usize = 3;
pub const LABEL_NAME_MIN_LENGTH: usize = 3;
pub const LABEL_NAME_MAX_LENGTH: usize = 1000;

pub fn validate_not_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "{field} may not be blank"
        )));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::ValidationError(format!(
            "{field} must be at least {min} characters long"
        )));
    }
    if len > max {
        return Err(AppError::ValidationError(format!(
            "{field} must be no more than {max} characters long"
        )));
    }
    Ok(())
}

/// Structural e-mail check: `local@domain.tld`, no whitespace.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_not_blank("Email", value)?;

    let invalid = || AppError::ValidationError("Email address is incorrect".to_string());

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), AppError> {
    validate_not_blank("Password", value)?;
    validate_length("Password", value, PASSWORD_MIN_LENGTH, usize::MAX)
}

pub fn validate_label_name(value: &str) -> Result<(), AppError> {
    validate_not_blank("Name", value)?;
    validate_length(
        "Name",
        value,
        LABEL_NAME_MIN_LENGTH,
        LABEL_NAME_MAX_LENGTH,
    )
}
