//! PostgreSQL pool for the allotment tables.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use examhall_core::config::DatabaseConfig;
use examhall_core::error::{AppError, ErrorKind};

/// Connected PostgreSQL pool, migrated when the config asks for it.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connects and, when `run_migrations` is set, applies pending
    /// migrations before the pool is handed out.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            target = %server_address(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach allotment database: {e}"),
                    e,
                )
            })?;
        let db = Self { pool };

        if config.run_migrations {
            db.migrate().await?;
        } else {
            warn!("Migrations disabled; schema is assumed to be current");
        }
        Ok(db)
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Allotment schema migration failed: {e}"),
                    e,
                )
            })?;
        info!("Allotment schema is up to date");
        Ok(())
    }

    /// The sqlx pool the repositories run on.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// `host[:port]/database` of a connection URL, without credentials or
/// query parameters.
fn server_address(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    rest.split('?').next().unwrap_or(rest)
}
