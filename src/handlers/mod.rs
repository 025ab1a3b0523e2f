//! BFF route handlers
//!
//! Both routes share one `BffState`, built once at startup and attached with
//! an `Extension` layer.

use std::sync::Arc;

use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::config::AppConfig;
use crate::domain::services::{BlobStore, ForwardedHeaderSessionProvider, SessionError, SessionProvider};
use crate::infrastructure::{AzureBlobStore, QaBackendClient};
use crate::shared::constants::{ASK_ROUTE, UPLOAD_CONTAINER, UPLOAD_ROUTE};
use crate::shared::logging::LogOperation;

/// Authenticated search proxy to the QA backend
pub mod ask;

/// Multipart upload proxy to the blob store
pub mod upload;

pub use ask::{AskParams, ask_handler};
pub use upload::upload_handler;

/// Shared, read-only handler state
#[derive(Clone)]
pub struct BffState {
    pub config: Arc<AppConfig>,
    pub backend: QaBackendClient,
    pub sessions: Arc<dyn SessionProvider>,
    /// `None` when no connection string is configured; uploads then fail with 500
    pub blobs: Option<Arc<dyn BlobStore>>,
}

impl BffState {
    pub fn new(
        config: AppConfig,
        sessions: Arc<dyn SessionProvider>,
        blobs: Option<Arc<dyn BlobStore>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            backend: QaBackendClient::new(),
            sessions,
            blobs,
        }
    }

    /// Wire the forwarded-header session provider and, when configured, Azure blob storage
    pub fn from_config(config: AppConfig) -> Result<Self, SessionError> {
        let sessions = ForwardedHeaderSessionProvider::new(
            &config.session_email_header,
            &config.session_id_token_header,
        )?;

        let blobs: Option<Arc<dyn BlobStore>> = match config.storage_connection_string() {
            None => None,
            Some(connection_string) => {
                match AzureBlobStore::from_connection_string(connection_string, UPLOAD_CONTAINER) {
                    Ok(store) => {
                        tracing::info!(
                            operation = LogOperation::Config.as_str(),
                            container = UPLOAD_CONTAINER,
                            "Blob store configured"
                        );
                        Some(Arc::new(store))
                    }
                    Err(e) => {
                        tracing::error!(
                            operation = LogOperation::Config.as_str(),
                            error = %e,
                            "Invalid storage connection string, uploads disabled"
                        );
                        None
                    }
                }
            }
        };

        Ok(Self::new(config, Arc::new(sessions), blobs))
    }
}

/// `/api/ask` and `/api/upload`, ready to merge into the app router
pub fn api_router(state: BffState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route(ASK_ROUTE, get(ask_handler))
        .route(UPLOAD_ROUTE, post(upload_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
}
