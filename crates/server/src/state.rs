//! Application state shared across handlers.

use std::sync::Arc;

use ngantri_core::BusinessCalendar;
use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{PawnshopRepository, QueueRepository};
use crate::services::auth::{PlaceholderAuthenticator, StaffAuthenticator};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    authenticator: Arc<dyn StaffAuthenticator>,
}

impl AppState {
    /// Create a new application state using the placeholder authenticator.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        Self::with_authenticator(config, pool, Arc::new(PlaceholderAuthenticator))
    }

    /// Create a new application state with a custom staff authenticator.
    #[must_use]
    pub fn with_authenticator(
        config: ServerConfig,
        pool: PgPool,
        authenticator: Arc<dyn StaffAuthenticator>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                authenticator,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The business calendar deciding queue day boundaries.
    #[must_use]
    pub fn calendar(&self) -> BusinessCalendar {
        self.inner.config.calendar
    }

    /// Get the staff authenticator.
    #[must_use]
    pub fn authenticator(&self) -> &dyn StaffAuthenticator {
        self.inner.authenticator.as_ref()
    }

    /// Queue ticket repository bound to this state's pool and calendar.
    #[must_use]
    pub fn queue(&self) -> QueueRepository<'_> {
        QueueRepository::new(self.pool(), self.calendar())
    }

    /// Intake record repository bound to this state's pool.
    #[must_use]
    pub fn pawnshops(&self) -> PawnshopRepository<'_> {
        PawnshopRepository::new(self.pool())
    }
}
