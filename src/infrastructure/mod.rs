// Outbound adapters: QA backend client and blob storage

pub mod azure_blob;
pub mod qa_backend;

pub use azure_blob::{AzureBlobStore, ConnectionStringError, StorageAccount};
pub use qa_backend::{BackendReply, QaBackendClient};
