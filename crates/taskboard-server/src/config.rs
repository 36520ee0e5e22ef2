use taskboard_core::AppError;

/// Server settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub seed_on_start: bool,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `JWT_SECRET` (required)
    /// - `TASKBOARD_PORT` (optional, defaults to 8080)
    /// - `JWT_TTL_SECONDS` (optional, defaults to 3600)
    /// - `SEED_ON_START` (optional, defaults to true)
    /// - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` (optional)
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::ConfigError("JWT_SECRET not set".into()))?;

        Ok(Self {
            port: parse_var("TASKBOARD_PORT", 8080)?,
            jwt_secret,
            jwt_ttl_seconds: parse_var("JWT_TTL_SECONDS", 3600)?,
            seed_on_start: parse_var("SEED_ON_START", true)?,
            sentry_dsn: non_empty_var("SENTRY_DSN"),
            sentry_environment: non_empty_var("SENTRY_ENVIRONMENT"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match non_empty_var(name) {
        None => Ok(default),
        Some(raw) => parse_value(name, &raw),
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("Invalid {name} '{raw}'")))
}
