// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitBro API Server
//!
//! Serves the gym management REST API backed by a local SQLite database.

use fitbro_backend::{
    config::Config,
    db::Database,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        enforce_roles = config.enforce_roles,
        "Starting FitBro API"
    );

    // Open the database and bring the schema up to date
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    tracing::info!(url = %config.database_url, "Database ready");

    if let Some(seed) = &config.admin_seed {
        db.seed_admin(seed).await?;
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let port = config.port;
    let state = Arc::new(AppState::new(config, db));
    let app = fitbro_backend::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fitbro_backend=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
