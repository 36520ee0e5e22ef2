use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use taskboard_core::{LabelService, SeedConfig, TaskStatusService, UserService, seed_defaults};
use taskboard_db::{Database, DatabaseConfig};
use taskboard_server::auth::TokenIssuer;
use taskboard_server::config::ServerConfig;
use taskboard_server::routes;
use taskboard_server::state::AppState;
use taskboard_server::telemetry;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    let _sentry = telemetry::init_sentry(&config)?;
    telemetry::init_subscriber()?;

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;

    if config.seed_on_start {
        seed_defaults(
            &UserService::new(db.user_repo()),
            &TaskStatusService::new(db.task_status_repo()),
            &LabelService::new(db.label_repo()),
            &SeedConfig::from_env(),
        )
        .await?;
    }

    let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_ttl_seconds)?;
    let state = Arc::new(AppState { db, tokens });

    let app = routes::router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
