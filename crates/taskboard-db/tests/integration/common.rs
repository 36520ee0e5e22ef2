use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use taskboard_core::models::{LabelDraft, TaskStatusDraft, UserDraft};
use taskboard_db::Database;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Spins up a PostgreSQL container, migrates it, and returns the database.
///
/// The `ContainerAsync` must be kept in scope for the test duration;
/// dropping it stops the container.
pub async fn setup_test_db() -> (Database, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "taskboard_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let connection_string =
        format!("postgresql://postgres:postgres@{host}:{port}/taskboard_test");

    let db = Database::from_pool(retry_connect(&connection_string).await);
    db.migrate().await.expect("Failed to run migrations");

    (db, container)
}

// The container logs "ready" once before its init restart; retry until it sticks.
async fn retry_connect(url: &str) -> PgPool {
    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    loop {
        match PgPoolOptions::new().max_connections(5).connect(url).await {
            Ok(pool) => return pool,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!("Failed to connect to database after {MAX_RETRIES} retries: {e}");
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    }
}

pub fn user_draft(email: &str) -> UserDraft {
    UserDraft {
        first_name: Some("Ada".into()),
        last_name: None,
        email: email.into(),
        password_digest: "digest".into(),
    }
}

pub fn status_draft(name: &str, slug: &str) -> TaskStatusDraft {
    TaskStatusDraft {
        name: name.into(),
        slug: slug.into(),
    }
}

pub fn label_draft(name: &str) -> LabelDraft {
    LabelDraft { name: name.into() }
}
