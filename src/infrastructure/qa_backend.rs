use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};

use crate::shared::constants::BFF_SECRET_HEADER;

/// Raw answer from the QA backend; the body is relayed as text
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: u16,
    pub body: String,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pooled HTTP client for the QA backend's `/ask` endpoint
#[derive(Clone, Default)]
pub struct QaBackendClient {
    client: Client,
}

impl QaBackendClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// `{base}/ask?q=...` with the query percent-encoded
    pub fn ask_url(base: &str, query: &str) -> String {
        format!(
            "{}/ask?q={}",
            base.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }

    /// Forward a query with the caller's id token and the shared secret.
    /// Only transport failures are errors; any HTTP status is returned as a reply.
    pub async fn forward_ask(
        &self,
        base: &str,
        secret: &str,
        id_token: &str,
        query: &str,
    ) -> Result<BackendReply, reqwest::Error> {
        let response = self
            .client
            .get(Self::ask_url(base, query))
            .header(AUTHORIZATION, format!("Bearer {}", id_token))
            .header(BFF_SECRET_HEADER, secret)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(BackendReply { status, body })
    }
}
