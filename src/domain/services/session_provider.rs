//! Session provider contract
//!
//! The BFF never issues sessions itself. An authenticating reverse proxy in
//! front of it does, and hands the identity over in request headers.

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderName};
use thiserror::Error;

use crate::domain::models::Session;

/// Errors raised by a session provider
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Header {0} is not valid UTF-8")]
    MalformedHeader(String),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("Session backend error: {0}")]
    Backend(String),
}

/// Resolves the caller's session for one request
///
/// `Ok(None)` means no session at all; providers only fail on internal errors.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError>;
}

/// Reads the session from headers injected by an authenticating proxy
#[derive(Debug, Clone)]
pub struct ForwardedHeaderSessionProvider {
    email_header: HeaderName,
    id_token_header: HeaderName,
}

impl ForwardedHeaderSessionProvider {
    pub fn new(email_header: &str, id_token_header: &str) -> Result<Self, SessionError> {
        let parse = |name: &str| {
            HeaderName::from_bytes(name.trim().to_ascii_lowercase().as_bytes())
                .map_err(|_| SessionError::InvalidHeaderName(name.to_string()))
        };

        Ok(Self {
            email_header: parse(email_header)?,
            id_token_header: parse(id_token_header)?,
        })
    }

    fn header_value(&self, headers: &HeaderMap, name: &HeaderName) -> Result<Option<String>, SessionError> {
        match headers.get(name) {
            None => Ok(None),
            Some(value) => value
                .to_str()
                .map(|v| Some(v.trim().to_string()).filter(|v| !v.is_empty()))
                .map_err(|_| SessionError::MalformedHeader(name.to_string())),
        }
    }
}

#[async_trait]
impl SessionProvider for ForwardedHeaderSessionProvider {
    async fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        let user_email = self.header_value(headers, &self.email_header)?;
        let id_token = self.header_value(headers, &self.id_token_header)?;

        if user_email.is_none() && id_token.is_none() {
            return Ok(None);
        }

        Ok(Some(Session { user_email, id_token }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn provider() -> ForwardedHeaderSessionProvider {
        ForwardedHeaderSessionProvider::new("X-Forwarded-Email", "x-forwarded-id-token").unwrap()
    }

    #[tokio::test]
    async fn test_no_headers_means_no_session() {
        let session = provider().session(&HeaderMap::new()).await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_reads_email_and_token() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-email", HeaderValue::from_static("user@example.com"));
        headers.insert("x-forwarded-id-token", HeaderValue::from_static("tok"));

        let session = provider().session(&headers).await.unwrap().unwrap();
        assert_eq!(session.user_email(), Some("user@example.com"));
        assert_eq!(session.id_token(), Some("tok"));
    }

    #[tokio::test]
    async fn test_email_without_token() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-email", HeaderValue::from_static("user@example.com"));

        let session = provider().session(&headers).await.unwrap().unwrap();
        assert!(session.id_token().is_none());
    }

    #[tokio::test]
    async fn test_non_utf8_header_is_an_error() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-email",
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );

        let result = provider().session(&headers).await;
        assert!(matches!(result, Err(SessionError::MalformedHeader(_))));
    }

    #[test]
    fn test_invalid_header_name() {
        let result = ForwardedHeaderSessionProvider::new("bad header", "x-id");
        assert!(matches!(result, Err(SessionError::InvalidHeaderName(_))));
    }
}
