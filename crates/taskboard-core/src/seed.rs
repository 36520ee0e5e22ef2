use crate::error::AppError;
use crate::label_service::LabelService;
use crate::models::{NewLabel, NewTaskStatus, NewUser};
use crate::task_status_service::TaskStatusService;
use crate::traits::{LabelStore, TaskStatusStore, UserStore};
use crate::user_service::UserService;

pub const DEFAULT_ADMIN_EMAIL: &str = "hexlet@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "qwerty";

/// `(slug, name)` pairs created on a fresh board.
pub const DEFAULT_TASK_STATUSES: [(&str, &str); 5] = [
    ("draft", "Draft"),
    ("to_review", "To review"),
    ("to_be_fixed", "To be fixed"),
    ("to_publish", "To publish"),
    ("published", "Published"),
];

pub const DEFAULT_LABELS: [&str; 2] = ["feature", "bug"];

/// Credentials of the administrator account created by [`seed_defaults`].
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl SeedConfig {
    /// Read configuration from environment variables.
    ///
    /// - `SEED_ADMIN_EMAIL` (optional, defaults to `hexlet@example.com`)
    /// - `SEED_ADMIN_PASSWORD` (optional, defaults to `qwerty`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            admin_email: std::env::var("SEED_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: std::env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or(defaults.admin_password),
        }
    }
}

/// What a seeding run actually inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub statuses_created: usize,
    pub labels_created: usize,
}

/// Create the admin user, the default task statuses and the default labels.
/// Entries that already exist are left alone, so repeated runs are no-ops.
pub async fn seed_defaults<U, S, L>(
    users: &UserService<U>,
    statuses: &TaskStatusService<S>,
    labels: &LabelService<L>,
    config: &SeedConfig,
) -> Result<SeedReport, AppError>
where
    U: UserStore,
    S: TaskStatusStore,
    L: LabelStore,
{
    let mut report = SeedReport::default();

    if !users.email_exists(&config.admin_email).await? {
        users
            .create(NewUser {
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
                ..Default::default()
            })
            .await?;
        report.admin_created = true;
    }

    for (slug, name) in DEFAULT_TASK_STATUSES {
        if statuses.slug_exists(slug).await? || statuses.name_exists(name).await? {
            continue;
        }
        statuses
            .create(NewTaskStatus {
                name: name.to_string(),
                slug: slug.to_string(),
            })
            .await?;
        report.statuses_created += 1;
    }

    for name in DEFAULT_LABELS {
        if labels.name_exists(name).await? {
            continue;
        }
        labels
            .create(NewLabel {
                name: name.to_string(),
            })
            .await?;
        report.labels_created += 1;
    }

    tracing::info!(
        admin_created = report.admin_created,
        statuses_created = report.statuses_created,
        labels_created = report.labels_created,
        "Seed data applied"
    );
    Ok(report)
}
