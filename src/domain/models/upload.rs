use serde::{Deserialize, Serialize};

/// One uploaded file on its way to the blob store
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Declared file name, used verbatim as the blob name
    pub blob_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadRequest {
    pub fn new(blob_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            blob_name: blob_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("blob_name", &self.blob_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Upload proxy success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
}
