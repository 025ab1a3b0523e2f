// Custom Dioxus hooks
pub mod use_search_state;
pub mod use_document_upload;

pub use use_search_state::{use_search_state, SearchController};
pub use use_document_upload::{use_document_upload, DocumentUploadState, UploadStatus, UPLOAD_INPUT_ID};
