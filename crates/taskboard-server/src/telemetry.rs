use sentry::ClientInitGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::ServerConfig;

/// Start the Sentry client. Without a DSN the returned guard is inert.
pub fn init_sentry(config: &ServerConfig) -> anyhow::Result<ClientInitGuard> {
    let dsn = config
        .sentry_dsn
        .as_deref()
        .map(str::parse::<sentry::types::Dsn>)
        .transpose()?;

    Ok(sentry::init(sentry::ClientOptions {
        dsn,
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Into::into),
        ..Default::default()
    }))
}

/// Install the global subscriber: env filter, fmt output, and the Sentry
/// layer that forwards `error!` events.
pub fn init_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("taskboard=info".parse()?);

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer())
        .try_init()?;
    Ok(())
}
