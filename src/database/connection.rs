//! Database connection management

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

use crate::config::DatabaseConfig;
use crate::utils::errors::{KnuutError, Result};

pub type DatabasePool = Pool<Postgres>;

/// Store backend selected by the connection string scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Memory,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url)?;
        match parsed.scheme() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "memory" => Ok(Backend::Memory),
            other => Err(KnuutError::Config(format!(
                "unsupported database scheme: {}",
                other
            ))),
        }
    }
}

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| KnuutError::Config("database url is not set".to_string()))?;

    let statement_timeout = format!("{}s", config.command_timeout_secs);
    let options = PgConnectOptions::from_str(url)?
        .options([("statement_timeout", statement_timeout.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created successfully"
    );
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}
