// Domain models (business entities)
// Pure Rust, no framework dependencies

pub mod session;
pub mod search;
pub mod upload;

pub use session::Session;
pub use search::*;
pub use upload::{UploadRequest, UploadResponse};
