//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with startup retries)
/// - Schema migrations
/// - Random code generator, seeded once
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_with_retry(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let state = AppState::new(
        repository,
        Arc::new(RandomCodeGenerator::new()),
        config.domain.clone(),
    );

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, config.request_timeout_seconds));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the connection pool, retrying with exponential backoff.
///
/// Makes `DB_CONNECT_RETRIES` attempts in total, waiting 200ms, 400ms, ...
/// (capped at 5s, jittered) between them.
pub async fn connect_with_retry(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1) as usize);

    Retry::spawn(strategy, || {
        let options = options.clone();
        let url = config.database_url.clone();
        async move {
            options.connect(&url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection attempt failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
