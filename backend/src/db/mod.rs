//! PostgreSQL pool and migrations
//!
//! Only used when `storage.backend = "postgres"`.

use crate::config::StorageConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const MIN_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Open the pool described by the storage section
pub async fn create_pool(storage: &StorageConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&storage.database_url)
        .context("Invalid storage.database_url")?
        .application_name("fittrack");

    let pool = PgPoolOptions::new()
        .max_connections(storage.max_connections)
        .min_connections(MIN_CONNECTIONS.min(storage.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!(max_connections = storage.max_connections, "Database pool created");
    Ok(pool)
}

/// Apply `backend/migrations` (the `entities` table)
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations applied");
    Ok(())
}

pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        warn!(error = %e, "Database health check failed");
        anyhow::Error::from(e)
    })?;
    Ok(())
}
