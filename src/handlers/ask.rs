use std::time::Instant;

use axum::{Extension, Json, extract::Query, http::HeaderMap};
use serde::Deserialize;
use tracing::Instrument;

use super::BffState;
use crate::log_context;
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{
    LogOperation, log_ask_forward, log_backend_status, log_backend_unreachable,
    log_invalid_backend_json, log_missing_id_token, log_session_provider_error,
};

/// Query string of `GET /api/ask`
#[derive(Debug, Default, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl AskParams {
    /// First `q` in the query string; later duplicates are ignored
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            q: pairs.into_iter().find(|(k, _)| k == "q").map(|(_, v)| v),
        }
    }

    fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// GET /api/ask?q=...
///
/// Checks the session, then the query, then configuration, and only then
/// calls the QA backend. The backend's JSON is relayed as-is on success.
pub async fn ask_handler(
    Extension(state): Extension<BffState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>> {
    let params = AskParams::from_pairs(pairs);
    ask(&state, &headers, &params)
        .instrument(log_context!(LogOperation::AskProxy))
        .await
}

async fn ask(state: &BffState, headers: &HeaderMap, params: &AskParams) -> Result<Json<serde_json::Value>> {
    let session = state.sessions.session(headers).await.map_err(|e| {
        log_session_provider_error(&e.to_string());
        AppError::SessionProviderFailure
    })?;

    let session = session
        .filter(|s| s.user_email().is_some())
        .ok_or(AppError::AuthenticationFailure)?;

    let id_token = match session.id_token() {
        Some(token) => token,
        None => {
            log_missing_id_token(session.user_email());
            return Err(AppError::MissingCredential);
        }
    };

    let query = params.query().ok_or(AppError::MissingQuery)?;

    let base = state.config.backend_base()?;
    let secret = state.config.shared_secret()?;

    log_ask_forward(base, query.chars().count());
    let started = Instant::now();

    let reply = state
        .backend
        .forward_ask(base, secret, id_token, query)
        .await
        .map_err(|e| {
            log_backend_unreachable(base, &e.to_string());
            AppError::UpstreamUnavailable
        })?;

    log_backend_status(reply.status, started.elapsed().as_millis());

    if !reply.is_success() {
        return Err(AppError::UpstreamError {
            status: reply.status,
            raw: reply.body,
        });
    }

    match serde_json::from_str::<serde_json::Value>(&reply.body) {
        Ok(json) => Ok(Json(json)),
        Err(e) => {
            log_invalid_backend_json(&e.to_string(), reply.body.len());
            Err(AppError::MalformedUpstreamResponse { raw: reply.body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::models::{AnswerResult, Session};
    use crate::handlers::api_router;
    use crate::handlers::test_support::{StubSessions, signed_in, state_with};
    use axum::{
        Router,
        body::Body,
        extract::RawQuery,
        http::{Request, StatusCode},
        routing::get,
    };
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    #[derive(Default)]
    struct FakeBackend {
        hits: AtomicUsize,
        last_headers: Mutex<Option<HeaderMap>>,
        last_query: Mutex<Option<String>>,
    }

    /// QA backend answering every `/ask` with a fixed status and body
    async fn spawn_backend(status: StatusCode, body: &'static str) -> (String, Arc<FakeBackend>) {
        let fake = Arc::new(FakeBackend::default());
        let seen = fake.clone();
        let app = Router::new().route(
            "/ask",
            get(move |headers: HeaderMap, RawQuery(query): RawQuery| {
                let seen = seen.clone();
                async move {
                    seen.hits.fetch_add(1, Ordering::SeqCst);
                    *seen.last_headers.lock().unwrap() = Some(headers);
                    *seen.last_query.lock().unwrap() = query;
                    (status, body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/", addr), fake)
    }

    fn config_for(base: &str) -> AppConfig {
        AppConfig {
            backend_api_url: Some(base.to_string()),
            backend_shared_secret: Some("shared-secret".to_string()),
            ..AppConfig::default()
        }
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    const CONTRACT_BODY: &str = r#"{"answer":"契約書Xが最新です","contexts":[{"file_name":"契約書X.pdf","text":"...","metadata":{"category":"契約書"}}]}"#;

    #[tokio::test]
    async fn test_relays_backend_json() {
        let (base, backend) = spawn_backend(StatusCode::OK, CONTRACT_BODY).await;
        let router = api_router(state_with(config_for(&base), signed_in(), None));

        let uri = format!("/api/ask?q={}", urlencoding::encode("A社の最新契約書は？"));
        let (status, body) = call(router, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::from_str::<serde_json::Value>(CONTRACT_BODY).unwrap());
        let parsed: AnswerResult = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.contexts[0].file_name.as_deref(), Some("契約書X.pdf"));
        assert_eq!(backend.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_forwards_credentials_and_query() {
        let (base, backend) = spawn_backend(StatusCode::OK, r#"{"contexts":[]}"#).await;
        let router = api_router(state_with(config_for(&base), signed_in(), None));

        let (status, _) = call(router, "/api/ask?q=%20%20hello%20world%20").await;
        assert_eq!(status, StatusCode::OK);

        let headers = backend.last_headers.lock().unwrap().clone().unwrap();
        assert_eq!(headers["authorization"], "Bearer id-token-123");
        assert_eq!(headers["x-bff-secret"], "shared-secret");
        assert_eq!(headers["cache-control"], "no-store");
        assert_eq!(
            backend.last_query.lock().unwrap().as_deref(),
            Some("q=hello%20world")
        );
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected_before_forwarding() {
        let (base, backend) = spawn_backend(StatusCode::OK, "{}").await;

        for uri in ["/api/ask", "/api/ask?q=", "/api/ask?q=%20%09%20"] {
            let router = api_router(state_with(config_for(&base), signed_in(), None));
            let (status, body) = call(router, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body, serde_json::json!({ "error": "Missing q" }));
        }
        assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_requests_never_forward() {
        let (base, backend) = spawn_backend(StatusCode::OK, "{}").await;

        let cases = [
            (StubSessions(Ok(None)), "Not authenticated"),
            (
                StubSessions(Ok(Some(Session {
                    user_email: None,
                    id_token: Some("tok".to_string()),
                }))),
                "Not authenticated",
            ),
            (
                StubSessions(Ok(Some(Session::without_token("user@example.com")))),
                "Missing idToken",
            ),
        ];

        for (sessions, message) in cases {
            let router = api_router(state_with(config_for(&base), sessions, None));
            let (status, body) = call(router, "/api/ask?q=hello").await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"], message);
        }
        assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auth_is_checked_before_query() {
        let router = api_router(state_with(
            AppConfig::default(),
            StubSessions(Ok(None)),
            None,
        ));
        let (status, _) = call(router, "/api/ask").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_provider_failure_is_generic() {
        let router = api_router(state_with(
            AppConfig::default(),
            StubSessions(Err("redis timeout at 10.0.0.3".to_string())),
            None,
        ));
        let (status, body) = call(router, "/api/ask?q=hello").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "auth() failed" }));
    }

    #[tokio::test]
    async fn test_missing_configuration_names_the_key() {
        let router = api_router(state_with(AppConfig::default(), signed_in(), None));
        let (status, body) = call(router, "/api/ask?q=hello").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "BACKEND_API_URL is not set");

        let config = AppConfig {
            backend_api_url: Some("http://127.0.0.1:9".to_string()),
            ..AppConfig::default()
        };
        let router = api_router(state_with(config, signed_in(), None));
        let (status, body) = call(router, "/api/ask?q=hello").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "BFF_BACKEND_SHARED_SECRET is not set");
    }

    #[tokio::test]
    async fn test_backend_error_status_is_relayed() {
        let (base, _) = spawn_backend(StatusCode::SERVICE_UNAVAILABLE, "index rebuilding").await;
        let router = api_router(state_with(config_for(&base), signed_in(), None));

        let (status, body) = call(router, "/api/ask?q=hello").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            serde_json::json!({ "error": "backend error: 503", "raw": "index rebuilding" })
        );
    }

    #[tokio::test]
    async fn test_invalid_backend_json() {
        let (base, _) = spawn_backend(StatusCode::OK, "<html>oops</html>").await;
        let router = api_router(state_with(config_for(&base), signed_in(), None));

        let (status, body) = call(router, "/api/ask?q=hello").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Invalid JSON from backend", "raw": "<html>oops</html>" })
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // grab a free port, then close it so the connection is refused
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let router = api_router(state_with(
            config_for(&format!("http://{}", addr)),
            signed_in(),
            None,
        ));
        let (status, body) = call(router, "/api/ask?q=hello").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, serde_json::json!({ "error": "fetch backend failed" }));
    }

    #[test]
    fn test_first_q_wins() {
        let params = AskParams::from_pairs(vec![
            ("lang".to_string(), "ja".to_string()),
            ("q".to_string(), " first ".to_string()),
            ("q".to_string(), "second".to_string()),
        ]);
        assert_eq!(params.query(), Some("first"));
    }
}
