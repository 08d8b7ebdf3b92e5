// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

mod ai;
mod api;
mod auth;
mod config;
mod error;
mod models;
mod state;
mod store;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use ai::RecommendationClient;
use auth::TokenCodec;
use config::{AppConfig, LogFormat};
use state::AppState;
use store::InMemoryStore;

#[tokio::main]
async fn main() {
    // Configuration is mandatory before anything else; in particular the
    // server refuses to start without a signing secret.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let tokens = TokenCodec::new(&config.secret_key);
    let ai = RecommendationClient::from_config(&config);
    tracing::info!(
        ai_configured = ai.is_configured(),
        "initializing application state"
    );

    let state = AppState::new(InMemoryStore::new(), tokens, ai);
    let app = api::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("campus-map server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
