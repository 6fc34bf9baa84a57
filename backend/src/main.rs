//! Main entry point for the authentication backend.
//!
//! This file initializes the Axum web server, opens the database, and
//! registers the routes and shared extensions. The database pool lives from
//! startup until the server has shut down gracefully.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

#[cfg(test)]
mod test_utils;

use axum::{Extension, Router, routing::get};
use config::Config;
use database::Database;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let jwt_utils = JwtUtils::new(&config);
    let app = app(db.pool().clone(), jwt_utils, config.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(
        "Server is running on port {} ({:?} mode)",
        config.server_port, config.environment
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Builds the application router with its shared extensions.
pub fn app(pool: SqlitePool, jwt_utils: JwtUtils, config: Config) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(pool))
                .layer(Extension(jwt_utils))
                .layer(Extension(config)),
        )
}

async fn root_handler() -> &'static str {
    "Server is running"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
