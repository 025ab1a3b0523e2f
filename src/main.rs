//! Librarian BFF - Main Entry Point
//!
//! Serves the search UI and mounts the ask/upload proxy routes on the same
//! Axum router. Uses dioxus::serve() pattern for dx serve compatibility.

use librarian_bff::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    use librarian_bff::config::AppConfig;
    use librarian_bff::handlers::{BffState, api_router};

    // Initialize tracing BEFORE dioxus::serve
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Librarian BFF...");

    dioxus::serve(|| async move {
        // Flags belong to the dx CLI here, so read the environment only
        let config = AppConfig::from_env()?;
        config.log_status();

        let state = BffState::from_config(config)?;

        Ok(dioxus::server::router(App).merge(api_router(state)))
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    web_sys::console::log_1(&"[WASM] Librarian BFF - WASM initialized!".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
