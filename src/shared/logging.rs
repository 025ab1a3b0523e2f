//! Structured logging for the BFF
//!
//! Every event carries an `operation` field so proxy traffic can be filtered
//! per route. Secrets and tokens are never logged, only whether they are set.

/// Operations that emit log events
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    AskProxy,
    UploadProxy,
    SessionLookup,
    BlobWrite,
    Config,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::AskProxy => "ask_proxy",
            LogOperation::UploadProxy => "upload_proxy",
            LogOperation::SessionLookup => "session_lookup",
            LogOperation::BlobWrite => "blob_write",
            LogOperation::Config => "config",
        }
    }
}

/// Log whether a configuration value is present (never its value)
pub fn log_config_value(name: &str, is_set: bool) {
    if is_set {
        tracing::info!(
            operation = LogOperation::Config.as_str(),
            config_key = name,
            status = "set",
            "Configuration value loaded"
        );
    } else {
        tracing::warn!(
            operation = LogOperation::Config.as_str(),
            config_key = name,
            status = "MISSING",
            "Configuration value missing"
        );
    }
}

/// Log a session provider failure (details stay server-side)
pub fn log_session_provider_error(error: &str) {
    tracing::error!(
        operation = LogOperation::SessionLookup.as_str(),
        error = error,
        "Session provider failed"
    );
}

/// Log a session that has a user but no id token
pub fn log_missing_id_token(email: Option<&str>) {
    tracing::warn!(
        operation = LogOperation::SessionLookup.as_str(),
        has_user = email.is_some(),
        email = email.unwrap_or(""),
        "Missing idToken in session"
    );
}

/// Log the start of a forwarded ask
pub fn log_ask_forward(backend: &str, query_chars: usize) {
    tracing::info!(
        operation = LogOperation::AskProxy.as_str(),
        backend = backend,
        query_chars = query_chars,
        "Forwarding query to QA backend"
    );
}

/// Log a network failure reaching the QA backend
pub fn log_backend_unreachable(backend: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::AskProxy.as_str(),
        backend = backend,
        error = error,
        "fetch backend failed"
    );
}

/// Log the QA backend's answer status
pub fn log_backend_status(status: u16, elapsed_ms: u128) {
    if (200..300).contains(&status) {
        tracing::info!(
            operation = LogOperation::AskProxy.as_str(),
            status = status,
            elapsed_ms = elapsed_ms as u64,
            "QA backend answered"
        );
    } else {
        tracing::warn!(
            operation = LogOperation::AskProxy.as_str(),
            status = status,
            elapsed_ms = elapsed_ms as u64,
            "QA backend returned an error status"
        );
    }
}

/// Log a 2xx backend body that is not JSON
pub fn log_invalid_backend_json(error: &str, body_len: usize) {
    tracing::error!(
        operation = LogOperation::AskProxy.as_str(),
        error = error,
        body_len = body_len,
        "Invalid JSON from backend"
    );
}

/// Log an upload request reaching the blob store
pub fn log_upload_start(blob_name: &str, content_type: &str, size: usize) {
    tracing::info!(
        operation = LogOperation::UploadProxy.as_str(),
        blob_name = blob_name,
        content_type = content_type,
        size = size,
        "Uploading file to blob store"
    );
}

/// Log a completed upload
pub fn log_upload_success(blob_name: &str, url: &str) {
    tracing::info!(
        operation = LogOperation::UploadProxy.as_str(),
        blob_name = blob_name,
        url = url,
        "Upload completed"
    );
}

/// Log an upload failure with its internal cause
pub fn log_upload_error(blob_name: Option<&str>, error: &str) {
    tracing::error!(
        operation = LogOperation::UploadProxy.as_str(),
        blob_name = blob_name.unwrap_or(""),
        error = error,
        "Upload failed"
    );
}

/// Log a blob write rejected by the store
pub fn log_blob_rejected(blob_name: &str, status: u16) {
    tracing::warn!(
        operation = LogOperation::BlobWrite.as_str(),
        blob_name = blob_name,
        status = status,
        "Blob store rejected write"
    );
}

/// Macro for creating a per-request span
#[macro_export]
macro_rules! log_context {
    ($operation:expr) => {
        tracing::info_span!(
            "bff",
            operation = $operation.as_str(),
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $request_id:expr) => {
        tracing::info_span!(
            "bff",
            operation = $operation.as_str(),
            request_id = %$request_id
        )
    };
}
