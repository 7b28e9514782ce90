//! Job posting and policy document generation.

use super::{list_field, read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::http::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyState {
    pub job_posting: Option<Value>,
    pub policy_document: Option<Value>,
    pub locations: Vec<Value>,
    pub tones: Vec<Value>,
}

pub struct PolicyStore {
    pipeline: Arc<RequestPipeline>,
    state: RwLock<PolicyState>,
    status: StoreStatus,
}

impl PolicyStore {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self {
            pipeline,
            state: RwLock::new(PolicyState::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn state(&self) -> PolicyState {
        read(&self.state)
    }

    /// Generates a job posting from a free-form request (title, tone, ...).
    pub async fn generate_job_posting<T: Serialize>(&self, posting_request: &T) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::POLICY_GENERATE_JOB)
                    .json(posting_request)?
                    .fallback_message("Job posting generation failed");
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| state.job_posting = Some(body.clone()));
                Ok(body)
            })
            .await
    }

    pub async fn generate_policy_document(
        &self,
        location: &str,
        requirements: &str,
    ) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::POLICY_GENERATE_DOCUMENT)
                    .json(&json!({ "location": location, "requirements": requirements }))?
                    .fallback_message("Policy document generation failed");
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| state.policy_document = Some(body.clone()));
                Ok(body)
            })
            .await
    }

    pub async fn fetch_locations(&self) -> Result<Vec<Value>> {
        self.status
            .track(async {
                let request = ApiRequest::get(endpoints::POLICY_LOCATIONS)
                    .fallback_message("Failed to fetch locations");
                let locations = list_field(&self.pipeline.send_json(request).await?, "locations");
                update(&self.state, |state| state.locations = locations.clone());
                Ok(locations)
            })
            .await
    }

    pub async fn fetch_tones(&self) -> Result<Vec<Value>> {
        self.status
            .track(async {
                let request = ApiRequest::get(endpoints::POLICY_TONES)
                    .fallback_message("Failed to fetch tones");
                let tones = list_field(&self.pipeline.send_json(request).await?, "tones");
                update(&self.state, |state| state.tones = tones.clone());
                Ok(tones)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use talentdesk_core::http::{ApiResponse, RequestBody};

    #[tokio::test]
    async fn test_job_posting_request_is_sent_verbatim() {
        let fixture = Fixture::authenticated("abc");
        let store = PolicyStore::new(fixture.pipeline.clone());
        fixture.transport.respond(ApiResponse::ok(json!({"posting": "We are hiring"})));

        let posting = json!({"job_title": "Backend Engineer", "tone": "friendly"});
        store.generate_job_posting(&posting).await.unwrap();

        assert_eq!(fixture.transport.last_request().body, RequestBody::Json(posting));
        assert_eq!(store.state().job_posting.unwrap()["posting"], "We are hiring");
    }

    #[tokio::test]
    async fn test_locations_and_tones() {
        let fixture = Fixture::new();
        let store = PolicyStore::new(fixture.pipeline.clone());
        fixture.transport.respond(ApiResponse::ok(json!({"locations": ["Singapore", "India"]})));
        fixture.transport.respond(ApiResponse::new(500, Some(json!({}))));

        assert_eq!(store.fetch_locations().await.unwrap().len(), 2);
        let err = store.fetch_tones().await.unwrap_err();

        assert_eq!(err.user_message(), "Failed to fetch tones");
        assert_eq!(store.state().locations.len(), 2);
        assert!(store.state().tones.is_empty());
    }
}
