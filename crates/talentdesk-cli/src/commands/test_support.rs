//! Scripted backend for command tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use talentdesk_application::Portal;
use talentdesk_core::clock::SystemClock;
use talentdesk_core::http::{ApiRequest, ApiResponse, HttpTransport};
use talentdesk_core::{DeskError, Result};
use talentdesk_infrastructure::{InMemoryKeyValueStore, TracingNavigator};

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn respond(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DeskError::transport("Network Error: no scripted response"))
    }
}

pub fn portal_with(transport: Arc<MockTransport>) -> Portal {
    Portal::new(
        transport,
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(TracingNavigator::new()),
        Arc::new(SystemClock),
        Duration::from_secs(10),
    )
    .unwrap()
}
