use axum::{
    Extension, Json,
    extract::{Multipart, multipart::MultipartRejection},
};

use super::BffState;
use crate::domain::models::{UploadRequest, UploadResponse};
use crate::shared::constants::{UPLOAD_FIELD, UPLOAD_SUCCESS_MESSAGE};
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{log_upload_error, log_upload_start, log_upload_success};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// POST /api/upload
///
/// Stores the multipart `file` field under its declared file name.
/// A blob with the same name is overwritten.
pub async fn upload_handler(
    Extension(state): Extension<BffState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| {
        log_upload_error(None, &e.to_string());
        AppError::UploadFailure
    })?;

    let request = read_file_field(&mut multipart).await?;

    let Some(store) = state.blobs.as_ref() else {
        log_upload_error(Some(&request.blob_name), "blob store is not configured");
        return Err(AppError::UploadFailure);
    };

    let blob_name = request.blob_name.clone();
    log_upload_start(&blob_name, &request.content_type, request.size());

    let url = store.put(request).await.map_err(|e| {
        log_upload_error(Some(&blob_name), &e.to_string());
        AppError::UploadFailure
    })?;

    log_upload_success(&blob_name, &url);

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        url,
    }))
}

/// First `file` field that carries a file name
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadRequest> {
    let read_error = |e: axum::extract::multipart::MultipartError| {
        log_upload_error(None, &e.to_string());
        AppError::UploadFailure
    };

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(file_name) = field
            .file_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
        else {
            return Err(AppError::MissingFile);
        };

        let content_type = field
            .content_type()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = field.bytes().await.map_err(read_error)?;
        return Ok(UploadRequest::new(file_name, content_type, data.to_vec()));
    }

    Err(AppError::MissingFile)
}
