//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, critic resolution, and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::repositories::UserRepository;
use crate::domain::scoring::EngineConfig;
use crate::infrastructure::persistence::{
    PgMovieRepository, PgRatingRepository, PgSessionRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Repositories};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the PostgreSQL pool from configuration.
pub async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Looks up the critic account by email, ignoring case and surrounding
/// whitespace.
///
/// A missing critic is not fatal: detail views then carry no deviation.
pub async fn resolve_critic(users: &dyn UserRepository, email: &str) -> Result<Option<i64>> {
    let email = email.trim().to_lowercase();
    let critic = users
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to look up critic: {e}"))?;

    match &critic {
        Some(user) => tracing::info!(critic_id = user.id, "Critic resolved"),
        None => tracing::warn!(
            email = %email,
            "Critic account not found; deviation feedback disabled"
        ),
    }

    Ok(critic.map(|user| user.id))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Critic lookup
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let users = Arc::new(PgUserRepository::new(pool.clone()));

    let critic_id = resolve_critic(&*users, &config.critic_email).await?;
    let engine = EngineConfig::new(config.single_overlap_disagreement, critic_id);

    let repositories = Repositories {
        users,
        movies: Arc::new(PgMovieRepository::new(pool.clone())),
        ratings: Arc::new(PgRatingRepository::new(pool.clone())),
        sessions: Arc::new(PgSessionRepository::new(pool)),
    };

    let state = AppState::new(repositories, engine, config.session_signing_secret.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
