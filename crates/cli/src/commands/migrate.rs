//! Database migration command.
//!
//! Applies the server's schema migrations (`crates/server/migrations/`) and
//! creates the session store table. The server runs the same steps on
//! startup, so this is only needed to prepare a database ahead of a deploy.

use ngantri_server::{db, middleware};

use super::{CommandError, connect};

/// Run all migrations.
pub async fn run() -> Result<(), CommandError> {
    let (_config, pool) = connect().await?;

    tracing::info!("Running schema migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Running session store migrations...");
    middleware::create_session_store(&pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
