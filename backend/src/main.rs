//! FitTrack backend
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: owner-scoped coordination of the shared calculators
//! - Store: JSON documents in memory or PostgreSQL
//! - Rate limiting: Redis counters with an in-process fallback

use anyhow::Result;
use fittrack_backend::config::{self, StorageBackend};
use fittrack_backend::rate_limit::{MemoryRateLimiter, RateLimiter, RedisRateLimiter};
use fittrack_backend::store::{MemoryStore, PgStore, Store};
use fittrack_backend::{db, routes, state::AppState};
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        storage = ?config.storage.backend,
        "Starting FitTrack backend"
    );

    let store = create_store(&config).await?;
    let limiter = create_limiter(&config).await;

    let state = AppState::new(store, limiter, config.clone());
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn create_store(config: &config::AppConfig) -> Result<Arc<dyn Store>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::create_pool(&config.storage).await?;
            db::run_migrations(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

/// Redis counters when enabled and reachable, otherwise in process
async fn create_limiter(config: &config::AppConfig) -> Arc<dyn RateLimiter> {
    if config.redis.enabled {
        if let Some(manager) = connect_redis(&config.redis.url).await {
            return Arc::new(RedisRateLimiter::new(manager));
        }
    }
    Arc::new(MemoryRateLimiter::new())
}

async fn connect_redis(url: &str) -> Option<ConnectionManager> {
    info!("Connecting to Redis...");

    match redis::Client::open(url) {
        Ok(client) => match ConnectionManager::new(client).await {
            Ok(conn) => {
                info!("Redis connection established");
                Some(conn)
            }
            Err(e) => {
                warn!("Failed to connect to Redis: {}. Rate limits will be tracked in process.", e);
                None
            }
        },
        Err(e) => {
            warn!("Invalid Redis URL: {}. Rate limits will be tracked in process.", e);
            None
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fittrack_backend=info,fittrack_shared=info,tower_http=info".into()
        } else {
            "fittrack_backend=debug,fittrack_shared=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
