use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{MISSING_FILE_MESSAGE, UPLOAD_FAILURE_MESSAGE};

/// JSON body of every BFF error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Failures surfaced at the BFF boundary
///
/// `Display` is the client-facing message; anything internal is logged, not returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("auth() failed")]
    SessionProviderFailure,

    #[error("Not authenticated")]
    AuthenticationFailure,

    #[error("Missing idToken")]
    MissingCredential,

    #[error("Missing q")]
    MissingQuery,

    #[error("{}", MISSING_FILE_MESSAGE)]
    MissingFile,

    #[error("{0} is not set")]
    ConfigurationFailure(&'static str),

    #[error("fetch backend failed")]
    UpstreamUnavailable,

    #[error("backend error: {status}")]
    UpstreamError { status: u16, raw: String },

    #[error("Invalid JSON from backend")]
    MalformedUpstreamResponse { raw: String },

    #[error("{}", UPLOAD_FAILURE_MESSAGE)]
    UploadFailure,
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::SessionProviderFailure => 500,
            AppError::AuthenticationFailure | AppError::MissingCredential => 401,
            AppError::MissingQuery | AppError::MissingFile => 400,
            AppError::ConfigurationFailure(_) => 500,
            AppError::UpstreamUnavailable => 502,
            AppError::UpstreamError { status, .. } => *status,
            AppError::MalformedUpstreamResponse { .. } => 502,
            AppError::UploadFailure => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let raw = match self {
            AppError::UpstreamError { raw, .. } | AppError::MalformedUpstreamResponse { raw } => {
                Some(raw.clone())
            }
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            raw,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, axum::Json(self.body())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures seen by the browser when calling the BFF
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("No file selected")]
    NoFileSelected,

    #[error("Only available in the browser")]
    Unsupported,
}
