//! CLI command implementations.

pub mod migrate;
pub mod queue;

use ngantri_server::config::{ConfigError, ServerConfig};
use ngantri_server::db::{self, RepositoryError};
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Ticket id could not be parsed.
    #[error("Invalid ticket id: {0}")]
    InvalidTicketId(String),
}

/// Load configuration and connect to the database.
pub async fn connect() -> Result<(ServerConfig, PgPool), CommandError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    Ok((config, pool))
}
