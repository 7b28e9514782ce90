//! Composition root for the portal client.

use crate::pipeline::RequestPipeline;
use crate::session_store::SessionStore;
use crate::stores::{
    AnalyticsStore, ChatStore, EmployeeStore, LearningStore, PolicyStore, RecruitmentStore,
    SentimentStore, WellnessStore,
};
use std::sync::Arc;
use std::time::Duration;
use talentdesk_core::Result;
use talentdesk_core::clock::{Clock, SystemClock};
use talentdesk_core::config::ClientConfig;
use talentdesk_core::http::HttpTransport;
use talentdesk_core::navigation::{self, NavigationDecision, Navigator};
use talentdesk_core::session::SessionContext;
use talentdesk_core::storage::KeyValueStore;
use talentdesk_infrastructure::{FileKeyValueStore, ReqwestTransport};

/// One session, one pipeline, and every store wired to them.
pub struct Portal {
    session: Arc<SessionContext>,
    pipeline: Arc<RequestPipeline>,
    pub auth: SessionStore,
    pub learning: LearningStore,
    pub chat: ChatStore,
    pub wellness: WellnessStore,
    pub recruitment: RecruitmentStore,
    pub analytics: AnalyticsStore,
    pub policy: PolicyStore,
    pub sentiment: SentimentStore,
    pub employee: EmployeeStore,
}

impl Portal {
    /// Wires the portal from its seams, restoring any persisted session.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Result<Self> {
        let session = Arc::new(SessionContext::restore(storage.clone())?);
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            session.clone(),
            navigator,
            timeout,
        ));

        Ok(Self {
            auth: SessionStore::new(pipeline.clone()),
            learning: LearningStore::new(pipeline.clone(), clock.clone()),
            chat: ChatStore::new(pipeline.clone(), clock.clone()),
            wellness: WellnessStore::new(pipeline.clone(), storage, clock),
            recruitment: RecruitmentStore::new(pipeline.clone()),
            analytics: AnalyticsStore::new(pipeline.clone()),
            policy: PolicyStore::new(pipeline.clone()),
            sentiment: SentimentStore::new(pipeline.clone()),
            employee: EmployeeStore::new(pipeline.clone()),
            session,
            pipeline,
        })
    }

    /// Wires the portal against the configured backend and on-disk storage.
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        tracing::info!("[Bootstrap] Opening client storage");
        let storage = Arc::new(FileKeyValueStore::open(config.storage_dir.as_deref())?);

        tracing::info!(base_url = %config.api_base_url, "[Bootstrap] Connecting transport");
        let transport = Arc::new(ReqwestTransport::from_config(config));

        let clock = Arc::new(SystemClock);
        let portal = Self::new(transport, storage, navigator, clock, config.timeout())?;
        tracing::info!(
            authenticated = portal.auth.is_authenticated(),
            "[Bootstrap] Portal ready"
        );
        Ok(portal)
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn pipeline(&self) -> &Arc<RequestPipeline> {
        &self.pipeline
    }

    /// Runs the navigation guard for `target` against the current session.
    pub fn guard(&self, target: &str) -> NavigationDecision {
        navigation::check(target, self.session.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTransport, RecordingNavigator};
    use chrono::NaiveDate;
    use serde_json::json;
    use talentdesk_core::clock::FixedClock;
    use talentdesk_core::http::ApiResponse;
    use tempfile::TempDir;

    fn portal(storage: Arc<dyn KeyValueStore>, transport: Arc<MockTransport>) -> Portal {
        Portal::new(
            transport,
            storage,
            Arc::new(RecordingNavigator::default()),
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())),
            Duration::from_secs(10),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_session_and_guard_survive_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let transport = Arc::new(MockTransport::default());

        let first = portal(Arc::new(FileKeyValueStore::new(path.clone())), transport.clone());
        assert_eq!(
            first.guard("/employee/dashboard"),
            NavigationDecision::RedirectToLogin {
                notice: "Please log in to access this page."
            }
        );
        transport.respond(ApiResponse::ok(json!({
            "token": "abc",
            "user": {"id": 1, "name": "Ada", "role": "employee"}
        })));
        first.auth.login("ada@example.com", "pw", "employee").await.unwrap();
        assert!(first.guard("/employee/dashboard").is_admitted());

        let second = portal(Arc::new(FileKeyValueStore::new(path)), transport.clone());
        assert!(second.auth.is_authenticated());
        assert!(second.guard("/employee/dashboard").is_admitted());
        assert!(!second.guard("/admin/analytics").is_admitted());

        transport.respond(ApiResponse::ok(json!({"leave_balance": 3})));
        second.employee.fetch_dashboard_summary(1).await.unwrap();
        assert_eq!(
            transport.last_request().header_value("Authorization"),
            Some("Bearer abc")
        );
    }

    #[tokio::test]
    async fn test_stores_share_one_session() {
        let temp_dir = TempDir::new().unwrap();
        let transport = Arc::new(MockTransport::default());
        let portal = portal(
            Arc::new(FileKeyValueStore::new(temp_dir.path().join("storage.json"))),
            transport.clone(),
        );
        portal.session().create("abc".into(), None, Some("hr".into())).unwrap();

        transport.respond(ApiResponse::new(401, None));
        let _ = portal.analytics.fetch_summary().await;

        assert!(!portal.auth.is_authenticated());
        assert!(!portal.guard("/admin").is_admitted());
    }
}
