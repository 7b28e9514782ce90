//! Scripted transport and wiring shared by the store tests.

use crate::pipeline::RequestPipeline;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use talentdesk_core::clock::FixedClock;
use talentdesk_core::http::{ApiRequest, ApiResponse, HttpTransport};
use talentdesk_core::navigation::Navigator;
use talentdesk_core::session::SessionContext;
use talentdesk_core::{DeskError, Result};
use talentdesk_infrastructure::InMemoryKeyValueStore;

struct Scripted {
    delay: Option<Duration>,
    result: Result<ApiResponse>,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn respond(&self, response: ApiResponse) {
        self.push(None, Ok(response));
    }

    pub fn respond_after(&self, delay: Duration, response: ApiResponse) {
        self.push(Some(delay), Ok(response));
    }

    pub fn fail(&self, error: DeskError) {
        self.push(None, Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }

    fn push(&self, delay: Option<Duration>, result: Result<ApiResponse>) {
        self.script.lock().unwrap().push_back(Scripted { delay, result });
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        let Some(scripted) = next else {
            return Err(DeskError::internal("no scripted response"));
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.result
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn login_redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Fixture {
    pub transport: Arc<MockTransport>,
    pub storage: Arc<InMemoryKeyValueStore>,
    pub session: Arc<SessionContext>,
    pub navigator: Arc<RecordingNavigator>,
    pub clock: Arc<FixedClock>,
    pub pipeline: Arc<RequestPipeline>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let transport = Arc::new(MockTransport::default());
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let session = Arc::new(SessionContext::new(storage.clone()));
        let navigator = Arc::new(RecordingNavigator::default());
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        let pipeline = Arc::new(RequestPipeline::new(
            transport.clone(),
            session.clone(),
            navigator.clone(),
            timeout,
        ));
        Self {
            transport,
            storage,
            session,
            navigator,
            clock,
            pipeline,
        }
    }

    pub fn authenticated(token: &str) -> Self {
        let fixture = Self::new();
        fixture
            .session
            .create(token.to_string(), None, Some("employee".to_string()))
            .unwrap();
        fixture
    }
}
