//! The request pipeline every remote call goes through.
//!
//! Adds the bearer credential, bounds the call in time, and turns failed
//! responses into [`DeskError`]s. A 401 from any endpoint terminates the
//! session before the error reaches the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use talentdesk_core::config::DEFAULT_TIMEOUT_SECS;
use talentdesk_core::http::{ApiRequest, ApiResponse, HttpTransport};
use talentdesk_core::navigation::Navigator;
use talentdesk_core::session::{SessionContext, SessionView};
use talentdesk_core::{DeskError, Result};

pub struct RequestPipeline {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionContext>,
    navigator: Arc<dyn Navigator>,
    timeout: Duration,
}

impl RequestPipeline {
    /// Creates a pipeline.
    ///
    /// # Arguments
    ///
    /// * `transport` - Sends the request and returns whatever the server answered
    /// * `session` - Source of the credential; cleared on 401
    /// * `navigator` - Sends the user to the login view on 401
    /// * `timeout` - Upper bound for a single request
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionContext>,
        navigator: Arc<dyn Navigator>,
        timeout: Duration,
    ) -> Self {
        let timeout = if timeout.is_zero() {
            tracing::warn!("Zero request timeout, using the default");
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            timeout
        };
        Self {
            transport,
            session,
            navigator,
            timeout,
        }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `request` and returns the 2xx response.
    ///
    /// # Errors
    ///
    /// - `Timeout` when no response arrived within the bound
    /// - `Transport` when the transport could not reach the server
    /// - `Unauthorized` on 401, after the session was cleared
    /// - `Server` for any other non-2xx status
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        if let Some(credential) = self.session.credential() {
            request = request.header("Authorization", format!("Bearer {}", credential));
        }

        let method = request.method;
        let path = request.path.clone();
        let fallback = request.fallback_message.clone();
        tracing::debug!(%method, %path, "Sending request");

        let outcome = tokio::time::timeout(self.timeout, self.transport.send(request)).await;
        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(%method, %path, error = %e, "Request failed without a response");
                return Err(e);
            }
            Err(_) => {
                let e = DeskError::Timeout {
                    after_ms: self.timeout.as_millis() as u64,
                };
                tracing::warn!(%method, %path, error = %e, "Request timed out");
                return Err(e);
            }
        };

        if response.is_success() {
            tracing::debug!(%method, %path, status = response.status, "Request succeeded");
            return Ok(response);
        }

        let message = response
            .server_message()
            .or(fallback)
            .unwrap_or_else(|| format!("Request failed with status code {}", response.status));

        if response.is_unauthorized() {
            self.terminate_session(&path);
            return Err(DeskError::unauthorized(message));
        }

        tracing::warn!(
            %method,
            %path,
            status = response.status,
            %message,
            "Server rejected request"
        );
        Err(DeskError::server(response.status, message))
    }

    /// Sends `request` and returns the JSON body (`Null` when empty).
    pub async fn send_json(&self, request: ApiRequest) -> Result<Value> {
        Ok(self.send(request).await?.into_json())
    }

    /// Sends `request` and deserializes the JSON body.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.send_json(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    fn terminate_session(&self, path: &str) {
        tracing::warn!(%path, "Received 401, terminating session");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Session storage was not fully cleared");
        }
        self.navigator.navigate_to_login();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use serde_json::json;
    use talentdesk_core::storage::{KeyValueStore, keys};

    #[tokio::test]
    async fn test_bearer_header_injected_when_credential_held() {
        let fixture = Fixture::authenticated("abc");
        fixture.transport.respond(ApiResponse::ok(json!({})));

        fixture.pipeline.send(ApiRequest::get("/api/auth/me")).await.unwrap();

        let sent = fixture.transport.requests();
        assert_eq!(sent[0].header_value("authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_no_header_without_credential() {
        let fixture = Fixture::new();
        fixture.transport.respond(ApiResponse::ok(json!({})));

        fixture.pipeline.send(ApiRequest::get("/api/policy/tones")).await.unwrap();

        assert_eq!(fixture.transport.requests()[0].header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_401_clears_session_and_navigates() {
        let fixture = Fixture::authenticated("abc");
        fixture.storage.set(keys::LEGACY_TOKEN, "old").unwrap();
        fixture.storage.set(keys::USER, "{}").unwrap();
        fixture
            .transport
            .respond(ApiResponse::new(401, Some(json!({"message": "Token expired"}))));

        let err = fixture
            .pipeline
            .send(ApiRequest::get("/api/analytics/summary"))
            .await
            .unwrap_err();

        assert_eq!(err, DeskError::unauthorized("Token expired"));
        assert!(!fixture.session.is_authenticated());
        for key in keys::SESSION_KEYS {
            assert_eq!(fixture.storage.get(key).unwrap(), None, "{} not cleared", key);
        }
        assert_eq!(fixture.navigator.login_redirects(), 1);
    }

    #[tokio::test]
    async fn test_server_error_message_precedence() {
        let fixture = Fixture::new();
        fixture
            .transport
            .respond(ApiResponse::new(500, Some(json!({"error": "Database error occurred"}))));
        fixture.transport.respond(ApiResponse::new(400, None));
        fixture.transport.respond(ApiResponse::new(404, None));

        let first = fixture.pipeline.send(ApiRequest::get("/api/x")).await.unwrap_err();
        assert_eq!(first, DeskError::server(500, "Database error occurred"));

        let second = fixture
            .pipeline
            .send(ApiRequest::post("/api/recruitment/upload").fallback_message("Upload failed"))
            .await
            .unwrap_err();
        assert_eq!(second, DeskError::server(400, "Upload failed"));

        let third = fixture.pipeline.send(ApiRequest::get("/api/x")).await.unwrap_err();
        assert_eq!(third.to_string(), "Request failed with status code 404");
        assert_eq!(fixture.navigator.login_redirects(), 0);
    }

    #[tokio::test]
    async fn test_timeout_is_distinct_from_server_error() {
        let fixture = Fixture::with_timeout(Duration::from_millis(20));
        fixture.session.create("abc".into(), None, None).unwrap();
        fixture.transport.respond_after(Duration::from_millis(500), ApiResponse::ok(json!({})));

        let err = fixture.pipeline.send(ApiRequest::get("/api/auth/me")).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(!err.is_server());
        assert_eq!(err.to_string(), "timeout of 20ms exceeded");
        assert!(fixture.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_zero_timeout_uses_default_bound() {
        let fixture = Fixture::with_timeout(Duration::ZERO);
        fixture
            .transport
            .respond_after(Duration::from_millis(1), ApiResponse::ok(json!({"ok": true})));

        let body = fixture.pipeline.send_json(ApiRequest::get("/api/auth/me")).await.unwrap();

        assert_eq!(body, json!({"ok": true}));
        assert_eq!(fixture.pipeline.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[tokio::test]
    async fn test_transport_failure_passes_through() {
        let fixture = Fixture::new();
        fixture.transport.fail(DeskError::transport("Network Error"));

        let err = fixture.pipeline.send(ApiRequest::get("/api/x")).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.user_message(), "Network Error");
    }
}
