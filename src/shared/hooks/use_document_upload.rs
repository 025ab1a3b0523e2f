use dioxus::prelude::*;

use crate::shared::constants::{NO_FILE_SELECTED_MESSAGE, UPLOAD_FAILURE_MESSAGE};
use crate::shared::errors::ApiError;
use crate::shared::services::ApiService;

/// Id of the file input the upload panel renders
pub const UPLOAD_INPUT_ID: &str = "document-upload-input";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Uploaded { message: String, url: String },
    Failed(String),
}

/// Document upload state for the upload panel
#[derive(Clone, Copy, PartialEq)]
pub struct DocumentUploadState {
    pub status: Signal<UploadStatus>,
}

impl DocumentUploadState {
    pub fn is_uploading(&self) -> bool {
        matches!(*self.status.read(), UploadStatus::Uploading)
    }

    /// Send the file selected in the upload input to the BFF
    pub fn upload_selected(&mut self) {
        if self.is_uploading() {
            return;
        }
        self.status.set(UploadStatus::Uploading);

        let mut status = self.status;
        spawn(async move {
            let next = match ApiService::new().upload_selected_file(UPLOAD_INPUT_ID).await {
                Ok(response) => {
                    tracing::info!("Uploaded document to {}", response.url);
                    UploadStatus::Uploaded {
                        message: response.message,
                        url: response.url,
                    }
                }
                Err(ApiError::NoFileSelected) => UploadStatus::Failed(NO_FILE_SELECTED_MESSAGE.to_string()),
                Err(e) => {
                    tracing::warn!("Document upload failed: {}", e);
                    UploadStatus::Failed(UPLOAD_FAILURE_MESSAGE.to_string())
                }
            };
            status.set(next);
        });
    }
}

/// Hook to manage document uploads
pub fn use_document_upload() -> DocumentUploadState {
    let status = use_signal(UploadStatus::default);

    DocumentUploadState { status }
}
