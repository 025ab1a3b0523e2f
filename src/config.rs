//! Process configuration
//!
//! Loaded once at startup from flags or environment variables and shared
//! read-only with every handler. Missing backend settings do not stop the
//! server: the ask proxy reports them per request with a 500 naming the key.

use clap::Parser;

use crate::shared::constants::{
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SESSION_EMAIL_HEADER, DEFAULT_SESSION_ID_TOKEN_HEADER,
};
use crate::shared::errors::AppError;
use crate::shared::logging::log_config_value;

pub const BACKEND_API_URL: &str = "BACKEND_API_URL";
pub const BFF_BACKEND_SHARED_SECRET: &str = "BFF_BACKEND_SHARED_SECRET";
pub const AZURE_STORAGE_CONNECTION_STRING: &str = "AZURE_STORAGE_CONNECTION_STRING";

#[derive(Clone, Parser)]
#[command(name = "librarian-bff", version, about = "Document search BFF")]
pub struct AppConfig {
    /// Base URL of the QA backend (`/ask` is appended)
    #[arg(long, env = BACKEND_API_URL)]
    pub backend_api_url: Option<String>,

    /// Shared secret proving requests come from this BFF
    #[arg(long, env = BFF_BACKEND_SHARED_SECRET, hide_env_values = true)]
    pub backend_shared_secret: Option<String>,

    /// Blob storage connection string
    #[arg(long, env = AZURE_STORAGE_CONNECTION_STRING, hide_env_values = true)]
    pub storage_connection_string: Option<String>,

    /// Header carrying the authenticated user's email
    #[arg(long, env = "SESSION_EMAIL_HEADER", default_value = DEFAULT_SESSION_EMAIL_HEADER)]
    pub session_email_header: String,

    /// Header carrying the authenticated user's id token
    #[arg(long, env = "SESSION_ID_TOKEN_HEADER", default_value = DEFAULT_SESSION_ID_TOKEN_HEADER)]
    pub session_id_token_header: String,

    /// Maximum accepted upload body size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Port for the standalone API server
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment only (no command-line flags)
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(["librarian-bff"])
    }

    /// QA backend base URL without trailing slashes
    pub fn backend_base(&self) -> Result<&str, AppError> {
        non_blank(self.backend_api_url.as_deref())
            .map(|url| url.trim_end_matches('/'))
            .ok_or(AppError::ConfigurationFailure(BACKEND_API_URL))
    }

    pub fn shared_secret(&self) -> Result<&str, AppError> {
        non_blank(self.backend_shared_secret.as_deref())
            .ok_or(AppError::ConfigurationFailure(BFF_BACKEND_SHARED_SECRET))
    }

    pub fn storage_connection_string(&self) -> Option<&str> {
        non_blank(self.storage_connection_string.as_deref())
    }

    /// Log which values are set, never the values themselves
    pub fn log_status(&self) {
        log_config_value(BACKEND_API_URL, self.backend_base().is_ok());
        log_config_value(BFF_BACKEND_SHARED_SECRET, self.shared_secret().is_ok());
        log_config_value(
            AZURE_STORAGE_CONNECTION_STRING,
            self.storage_connection_string().is_some(),
        );
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_api_url: None,
            backend_shared_secret: None,
            storage_connection_string: None,
            session_email_header: DEFAULT_SESSION_EMAIL_HEADER.to_string(),
            session_id_token_header: DEFAULT_SESSION_ID_TOKEN_HEADER.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 3001,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppConfig")
            .field("backend_api_url", &self.backend_api_url)
            .field("backend_shared_secret", &redact(&self.backend_shared_secret))
            .field("storage_connection_string", &redact(&self.storage_connection_string))
            .field("session_email_header", &self.session_email_header)
            .field("session_id_token_header", &self.session_id_token_header)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("port", &self.port)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
