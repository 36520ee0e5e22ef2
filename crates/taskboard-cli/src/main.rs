use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskboard_core::models::NewUser;
use taskboard_core::{LabelService, SeedConfig, TaskStatusService, UserService, seed_defaults};
use taskboard_db::{Database, DatabaseConfig};
use taskboard_server::auth::TokenIssuer;

#[derive(Parser)]
#[command(name = "taskboard", version, about = "Taskboard administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create the default admin, task statuses and labels if missing
    Seed {
        /// Admin e-mail
        #[arg(long, env = "SEED_ADMIN_EMAIL")]
        admin_email: Option<String>,

        /// Admin password
        #[arg(long, env = "SEED_ADMIN_PASSWORD")]
        admin_password: Option<String>,
    },

    /// Register a new user
    CreateUser {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Print all users as JSON
    Users,

    /// Issue a bearer token for an existing user
    Token {
        /// User e-mail (token subject)
        #[arg(short, long)]
        email: String,

        /// HMAC secret shared with the server
        #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
        secret: String,

        /// Token lifetime in seconds
        #[arg(long, env = "JWT_TTL_SECONDS", default_value_t = 3600)]
        ttl: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("taskboard=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            let db = connect_db().await?;
            db.migrate().await.context("Failed to run migrations")?;
            println!("Migrations applied");
        }
        Commands::Seed {
            admin_email,
            admin_password,
        } => {
            let db = connect_db().await?;
            let defaults = SeedConfig::default();
            let config = SeedConfig {
                admin_email: admin_email.unwrap_or(defaults.admin_email),
                admin_password: admin_password.unwrap_or(defaults.admin_password),
            };
            cmd_seed(&db, &config).await?;
        }
        Commands::CreateUser {
            email,
            password,
            first_name,
            last_name,
        } => {
            let db = connect_db().await?;
            let user = UserService::new(db.user_repo())
                .create(NewUser {
                    first_name,
                    last_name,
                    email,
                    password,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Users => {
            let db = connect_db().await?;
            let users = UserService::new(db.user_repo()).list().await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Commands::Token { email, secret, ttl } => {
            let db = connect_db().await?;
            cmd_token(&db, &email, &secret, ttl).await?;
        }
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().context("DATABASE_URL not set")?;
    Database::connect(&config)
        .await
        .context("Failed to connect to database")
}

async fn cmd_seed(db: &Database, config: &SeedConfig) -> Result<()> {
    let report = seed_defaults(
        &UserService::new(db.user_repo()),
        &TaskStatusService::new(db.task_status_repo()),
        &LabelService::new(db.label_repo()),
        config,
    )
    .await?;

    println!(
        "Seeded: admin created = {}, statuses created = {}, labels created = {}",
        report.admin_created, report.statuses_created, report.labels_created
    );
    Ok(())
}

async fn cmd_token(db: &Database, email: &str, secret: &str, ttl: i64) -> Result<()> {
    let users = UserService::new(db.user_repo());
    if !users.email_exists(email).await? {
        anyhow::bail!("No user with e-mail {email}");
    }

    let token = TokenIssuer::new(secret, ttl)?.issue(email)?;
    println!("{token}");
    Ok(())
}
