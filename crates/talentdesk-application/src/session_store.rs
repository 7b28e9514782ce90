//! Authentication use cases on top of the session context.

use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use talentdesk_core::Result;
use talentdesk_core::http::ApiRequest;
use talentdesk_core::session::{SessionContext, SessionView, UserIdentity};

/// Role sent by `register` when the caller names none.
pub const DEFAULT_REGISTER_ROLE: &str = "employee";

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserIdentity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CurrentUser {
    user: UserIdentity,
}

pub struct SessionStore {
    pipeline: Arc<RequestPipeline>,
    session: Arc<SessionContext>,
    status: StoreStatus,
}

impl SessionStore {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        let session = pipeline.session().clone();
        Self {
            pipeline,
            session,
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.session.identity()
    }

    /// Exchanges credentials for a session.
    ///
    /// The email is lowercased before sending. On success the credential and
    /// role marker are persisted and the session becomes authenticated. A
    /// failed login leaves the previous session as it was, unless the server
    /// answered 401, which always ends the session.
    pub async fn login(&self, email: &str, password: &str, role: &str) -> Result<AuthPayload> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::AUTH_LOGIN).json(&json!({
                    "email": email.to_lowercase(),
                    "password": password,
                    "role": role,
                }))?;
                let payload: AuthPayload = self.pipeline.send_as(request).await?;

                self.session
                    .create(payload.token.clone(), payload.user.clone(), Some(role.to_string()))?;
                tracing::info!(role, "Logged in");
                Ok(payload)
            })
            .await
    }

    /// Creates an account. Does not start a session.
    pub async fn register(
        &self,
        fullname: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::AUTH_REGISTER).json(&json!({
                    "fullname": fullname,
                    "email": email.to_lowercase(),
                    "password": password,
                    "role": role.unwrap_or(DEFAULT_REGISTER_ROLE),
                }))?;
                self.pipeline.send_json(request).await
            })
            .await
    }

    /// Re-fetches the identity of the held credential.
    ///
    /// Returns `Ok(None)` without a request when no credential is held.
    pub async fn restore_identity(&self) -> Result<Option<UserIdentity>> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }

        self.status
            .track(async {
                let current: CurrentUser =
                    self.pipeline.send_as(ApiRequest::get(endpoints::AUTH_ME)).await?;
                self.session.set_identity(current.user.clone())?;
                Ok(Some(current.user))
            })
            .await
    }

    /// Ends the session locally. Safe to call repeatedly.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use serde_json::json;
    use talentdesk_core::DeskError;
    use talentdesk_core::http::{ApiResponse, RequestBody};
    use talentdesk_core::session::Role;
    use talentdesk_core::storage::{KeyValueStore, keys};

    fn login_ok(token: &str, role: &str) -> ApiResponse {
        ApiResponse::ok(json!({
            "token": token,
            "user": {"id": 7, "name": "Ada", "email": "ada@example.com", "role": role}
        }))
    }

    #[tokio::test]
    async fn test_login_lowercases_email_and_persists() {
        let fixture = Fixture::new();
        let store = SessionStore::new(fixture.pipeline.clone());
        fixture.transport.respond(login_ok("abc", "hr"));

        let payload = store.login("Ada@Example.COM", "pw", "hr").await.unwrap();

        assert_eq!(payload.token, "abc");
        let RequestBody::Json(body) = fixture.transport.last_request().body else {
            panic!("login must send JSON");
        };
        assert_eq!(body["email"], "ada@example.com");
        assert!(store.is_authenticated());
        assert_eq!(fixture.session.role(), Some(Role::Hr));
        assert_eq!(fixture.storage.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        assert_eq!(fixture.storage.get(keys::ROLE).unwrap().as_deref(), Some("hr"));
        assert!(!store.status().is_loading());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let fixture = Fixture::authenticated("old");
        let store = SessionStore::new(fixture.pipeline.clone());
        fixture
            .transport
            .respond(ApiResponse::new(
                400,
                Some(json!({"message": "Email and password required"})),
            ));

        let err = store.login("a@b.c", "", "employee").await.unwrap_err();

        assert_eq!(err, DeskError::server(400, "Email and password required"));
        assert_eq!(fixture.session.credential().as_deref(), Some("old"));
        assert_eq!(store.status().error().as_deref(), Some("Email and password required"));
    }

    #[tokio::test]
    async fn test_login_rejected_with_401_ends_session() {
        let fixture = Fixture::authenticated("old");
        let store = SessionStore::new(fixture.pipeline.clone());
        fixture
            .transport
            .respond(ApiResponse::new(401, Some(json!({"message": "Invalid credentials"}))));

        let err = store.login("a@b.c", "wrong", "employee").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!store.is_authenticated());
        assert_eq!(fixture.navigator.login_redirects(), 1);
    }

    #[tokio::test]
    async fn test_authenticated_tracks_last_terminal_event() {
        let fixture = Fixture::new();
        let store = SessionStore::new(fixture.pipeline.clone());
        assert!(!store.is_authenticated());

        fixture.transport.respond(login_ok("t1", "employee"));
        store.login("a@b.c", "pw", "employee").await.unwrap();
        assert!(store.is_authenticated());

        store.logout().unwrap();
        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(fixture.storage.get(keys::TOKEN).unwrap(), None);

        fixture.transport.respond(login_ok("t2", "employee"));
        store.login("a@b.c", "pw", "employee").await.unwrap();
        fixture.transport.respond(ApiResponse::new(401, None));
        let _ = store.restore_identity().await;
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_credential_survives_restart() {
        let fixture = Fixture::new();
        let store = SessionStore::new(fixture.pipeline.clone());
        fixture.transport.respond(login_ok("persisted", "candidate"));
        store.login("c@d.e", "pw", "candidate").await.unwrap();

        let restored = SessionContext::restore(fixture.storage.clone()).unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.credential().as_deref(), Some("persisted"));
        assert_eq!(restored.role(), Some(Role::Candidate));
    }

    #[tokio::test]
    async fn test_restore_identity_without_credential_sends_nothing() {
        let fixture = Fixture::new();
        let store = SessionStore::new(fixture.pipeline.clone());

        assert_eq!(store.restore_identity().await.unwrap(), None);
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_restore_identity_replaces_identity() {
        let fixture = Fixture::authenticated("abc");
        let store = SessionStore::new(fixture.pipeline.clone());
        fixture.transport.respond(ApiResponse::ok(json!({
            "user": {"user_id": 3, "name": "Grace", "role": "hr_manager", "emp_id": 12}
        })));

        let user = store.restore_identity().await.unwrap().unwrap();

        assert_eq!(user.name.as_deref(), Some("Grace"));
        assert_eq!(store.identity().and_then(|u| u.emp_id), Some(12));
        assert_eq!(fixture.session.role(), Some(Role::HrManager));
    }

    #[tokio::test]
    async fn test_register_defaults_role_and_keeps_session() {
        let fixture = Fixture::new();
        let store = SessionStore::new(fixture.pipeline.clone());
        fixture
            .transport
            .respond(ApiResponse::ok(json!({"message": "User registered successfully"})));

        store.register("Ada Lovelace", "ADA@x.io", "pw", None).await.unwrap();

        let RequestBody::Json(body) = fixture.transport.last_request().body else {
            panic!("register must send JSON");
        };
        assert_eq!(body["role"], "employee");
        assert_eq!(body["email"], "ada@x.io");
        assert!(!store.is_authenticated());
    }
}
