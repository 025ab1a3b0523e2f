//! Standalone API server (without Dioxus frontend)
//! Serves only /api/ask and /api/upload, for backend development and testing.
//!
//! Run with: PORT=3003 cargo run --bin server --features server

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use librarian_bff::config::AppConfig;
use librarian_bff::handlers::{BffState, api_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Librarian BFF API Server (standalone)...");

    let config = AppConfig::parse();
    config.log_status();
    let port = config.port;

    let state = BffState::from_config(config).context("building handler state")?;

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("serving API")?;

    Ok(())
}
