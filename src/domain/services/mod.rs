// Collaborator contracts for the BFF
// Implementations live in infrastructure/

pub mod session_provider;
pub mod blob_store;

pub use session_provider::{ForwardedHeaderSessionProvider, SessionError, SessionProvider};
pub use blob_store::{BlobStore, BlobStoreError};
