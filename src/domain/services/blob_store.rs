use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::UploadRequest;

/// Errors raised while writing to a blob store
#[derive(Error, Debug)]
pub enum BlobStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Blob store rejected the write with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid blob name: {0}")]
    InvalidName(String),

    #[error("Request signing failed: {0}")]
    Signing(String),
}

/// Named binary object storage
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write the object, replacing any blob with the same name, and return its URL
    async fn put(&self, request: UploadRequest) -> Result<String, BlobStoreError>;
}
