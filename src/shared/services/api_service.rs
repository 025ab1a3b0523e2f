#[cfg(target_arch = "wasm32")]
use gloo_net::http::{Request, Response};

use crate::domain::models::{AnswerResult, UploadResponse};
use crate::shared::errors::ApiError;

// Browser-side client for the BFF routes
#[derive(Debug, Clone, PartialEq)]
pub struct ApiService {
    base_url: String,
}

impl ApiService {
    /// Same-origin client
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the ask proxy for a query
    pub fn ask_url(&self, query: &str) -> String {
        format!(
            "{}{}?q={}",
            self.base_url,
            crate::shared::constants::ASK_ROUTE,
            urlencoding::encode(query)
        )
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, crate::shared::constants::UPLOAD_ROUTE)
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn ask(&self, query: &str) -> Result<AnswerResult, ApiError> {
        let response = Request::get(&self.ask_url(query))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = ensure_ok(response).await?;

        response
            .json::<AnswerResult>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn ask(&self, query: &str) -> Result<AnswerResult, ApiError> {
        tracing::warn!("Search is only available in the browser (query: {} chars)", query.chars().count());
        Err(ApiError::Unsupported)
    }

    /// Upload the file currently selected in the `<input type="file">` with this id
    #[cfg(target_arch = "wasm32")]
    pub async fn upload_selected_file(&self, input_id: &str) -> Result<UploadResponse, ApiError> {
        use wasm_bindgen::JsCast;
        use web_sys::{FormData, HtmlInputElement};

        let file = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(input_id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .ok_or(ApiError::NoFileSelected)?;

        let form_data = FormData::new()
            .map_err(|e| ApiError::Network(format!("FormData: {:?}", e)))?;
        form_data
            .append_with_blob_and_filename(crate::shared::constants::UPLOAD_FIELD, &file, &file.name())
            .map_err(|e| ApiError::Network(format!("FormData append: {:?}", e)))?;

        web_sys::console::log_1(&format!("[WASM] Uploading {} ({} bytes)", file.name(), file.size()).into());

        // Content-Type is left to the browser so the multipart boundary is set
        let response = Request::post(&self.upload_url())
            .body(form_data)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = ensure_ok(response).await?;

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn upload_selected_file(&self, input_id: &str) -> Result<UploadResponse, ApiError> {
        tracing::warn!("Upload from #{} is only available in the browser", input_id);
        Err(ApiError::Unsupported)
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = match response.json::<crate::shared::errors::ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => response.status_text(),
    };
    Err(ApiError::Status { status, message })
}
