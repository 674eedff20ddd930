//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend, wires services into [`AppState`], and runs the
//! Axum server until Ctrl-C.

use crate::application::services::{ProductService, WishlistService};
use crate::config::{Config, StorageBackend};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgProductRepository, PgReferenceRepository, PgWishlistRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool tuned from the `DB_*` settings.
///
/// # Errors
///
/// Returns an error if no database is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let url = config.require_database_url()?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")
}

/// Wires the PostgreSQL repositories into application state.
pub fn postgres_state(pool: Arc<PgPool>) -> AppState {
    let products = Arc::new(PgProductRepository::new(pool.clone()));
    let wishlists = Arc::new(PgWishlistRepository::new(pool.clone()));
    let references = Arc::new(PgReferenceRepository::new(pool));

    AppState::new(
        Arc::new(ProductService::new(products, references.clone())),
        Arc::new(WishlistService::new(wishlists, references.clone())),
        references,
    )
}

/// Wires one [`MemoryStore`] into every repository slot of application state.
pub fn memory_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(
        Arc::new(ProductService::new(store.clone(), store.clone())),
        Arc::new(WishlistService::new(store.clone(), store.clone())),
        store,
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool with migrations, or in-memory store)
/// - Product and wishlist services
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(&config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            postgres_state(Arc::new(pool))
        }
        StorageBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            let user = store.add_user("demo").await;
            let category = store.add_category("General").await;
            tracing::warn!(
                user_id = user.id,
                category_id = category.id,
                "Using in-memory storage; data is lost on shutdown"
            );

            memory_state(store)
        }
    };

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
