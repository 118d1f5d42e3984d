// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Levelhub API Server
//!
//! Logs users in via Roblox OAuth2 and keeps their hearted levels, play
//! queue, and profile in a JSON file on disk.

use levelhub::{
    config::Config,
    services::RobloxClient,
    sessions::SessionStore,
    store::{JsonFileBackend, UserStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Levelhub API");

    // File-backed user store
    let backend = JsonFileBackend::new(config.data_file.clone());
    let store = UserStore::new(Arc::new(backend));
    tracing::info!(path = %config.data_file.display(), "User store initialized");

    // Roblox identity provider
    let provider = Arc::new(RobloxClient::new(
        config.roblox_client_id.clone(),
        config.roblox_client_secret.clone(),
        config.roblox_redirect_uri.clone(),
        config.universe_id.clone(),
    ));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        provider,
        sessions: SessionStore::new(),
    });

    // Build router
    let app = levelhub::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
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

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("levelhub=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
