//! # Remote Client
//!
//! HTTP request/response client for the backend's resource paths.
//!
//! ## Resource Paths
//! ```text
//! POST   /products      PUT /products/{id}      DELETE /products/{id}
//! POST   /ingredients   PUT /ingredients/{id}   DELETE /ingredients/{id}
//! POST   /sales
//! POST   /expenses
//! GET    /reports/dashboard
//! ```
//!
//! Every call optionally returns a created/updated record: a 2xx response
//! with a body parses into `Some(T)`, an empty body yields `None`. How the
//! caller applies that record is the reconciliation policy's business
//! ([`crate::reconcile`]).
//!
//! ## Session Handling
//! When a [`SessionAuthority`] is attached, the bearer credential is added
//! to every request and a 401 triggers the single-refresh-then-retry
//! protocol documented in [`crate::session`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{RemoteError, RemoteResult};
use crate::session::SessionAuthority;

/// Request timeout. Anything slower than this counts as a connectivity
/// failure and triggers the local fallback.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// RemoteClient
// =============================================================================

/// HTTP client for the backend.
///
/// Cheap to clone - clones share the underlying connection pool.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Arc<dyn SessionAuthority>>,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session.is_some())
            .finish()
    }
}

impl RemoteClient {
    /// Creates a client without session handling (anonymous backend).
    pub fn new(base_url: &str) -> Self {
        RemoteClient {
            http: Self::build_http(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// Creates a client with an attached session authority.
    pub fn with_session(base_url: &str, session: Arc<dyn SessionAuthority>) -> Self {
        RemoteClient {
            http: Self::build_http(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Some(session),
        }
    }

    fn build_http() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            // Builder only fails on TLS backend misconfiguration, which is a
            // programming error, not a runtime condition.
            .expect("failed to build HTTP client")
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// GET a resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<Option<T>> {
        self.execute(self.http.get(self.url(path))).await
    }

    /// POST a new record; returns the created record when the backend
    /// supplies one.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> RemoteResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    /// PUT an update; returns the updated record when the backend
    /// supplies one.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> RemoteResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    /// DELETE a resource.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<Option<T>> {
        self.execute(self.http.delete(self.url(path))).await
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    /// Sends a request with bearer attach and the single-retry protocol.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<Option<T>> {
        // Keep a clone around for the one retry after a token refresh.
        let retry = request.try_clone();

        let request = match self.session.as_ref().and_then(|s| s.access_token()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(RemoteError::from)?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::parse(response).await;
        }

        // 401: refresh once and retry exactly once, if we have a session.
        let (Some(session), Some(retry)) = (self.session.as_ref(), retry) else {
            return Err(Self::application_error(response).await);
        };

        debug!("access token rejected, refreshing once");
        let token = match session.refresh().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "session refresh failed, logging out");
                session.logout();
                return Err(err);
            }
        };

        let response = retry
            .bearer_auth(token)
            .send()
            .await
            .map_err(RemoteError::from)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Second rejection: the session is dead. This is an application
            // failure - it must never trigger the offline fallback.
            warn!("access token rejected after refresh, logging out");
            session.logout();
            return Err(Self::application_error(response).await);
        }

        Self::parse(response).await
    }

    /// Turns a response into `Option<T>`: error statuses become
    /// application failures, empty bodies become `None`.
    async fn parse<T: DeserializeOwned>(response: Response) -> RemoteResult<Option<T>> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::application_error(response).await);
        }

        let bytes = response.bytes().await.map_err(RemoteError::from)?;
        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }

    /// Builds an application failure from an error response, pulling the
    /// server message out of a `{"message": ...}` envelope when present.
    async fn application_error(response: Response) -> RemoteError {
        let status = response.status().as_u16();
        let message = match response.bytes().await {
            Ok(bytes) => extract_message(&bytes),
            Err(_) => String::new(),
        };
        let message = if message.is_empty() {
            "request rejected".to_string()
        } else {
            message
        };
        RemoteError::Application { status, message }
    }
}

/// Extracts a display message from an error body.
fn extract_message(bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    String::from_utf8_lossy(bytes).trim().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
