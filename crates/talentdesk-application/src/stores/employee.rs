//! Employee self-service: dashboard, skill advice and HR documents.

use super::{field, read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::http::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeState {
    pub dashboard: Option<Value>,
    pub skill_recommendations: Value,
    pub reference_letter: Option<Value>,
    pub employment_proof: Option<Value>,
}

pub struct EmployeeStore {
    pipeline: Arc<RequestPipeline>,
    state: RwLock<EmployeeState>,
    status: StoreStatus,
}

impl EmployeeStore {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self {
            pipeline,
            state: RwLock::new(EmployeeState::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn state(&self) -> EmployeeState {
        read(&self.state)
    }

    pub async fn fetch_dashboard_summary(&self, employee_id: i64) -> Result<Value> {
        self.status
            .track(async {
                let body = self
                    .pipeline
                    .send_json(ApiRequest::get(endpoints::employee_dashboard(employee_id)))
                    .await?;
                update(&self.state, |state| state.dashboard = Some(body.clone()));
                Ok(body)
            })
            .await
    }

    pub async fn fetch_skill_recommendations(
        &self,
        employee_id: i64,
        career_goal: Option<&str>,
    ) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::EMPLOYEE_SKILLS).json(&json!({
                    "employee_id": employee_id,
                    "career_goal": career_goal,
                }))?;
                let body = self.pipeline.send_json(request).await?;
                let recommendations = field(&body, "recommendations");
                update(&self.state, |state| {
                    state.skill_recommendations = recommendations.clone()
                });
                Ok(recommendations)
            })
            .await
    }

    pub async fn generate_reference_letter(
        &self,
        employee_id: i64,
        achievements: Option<&str>,
    ) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::EMPLOYEE_REFERENCE).json(&json!({
                    "employee_id": employee_id,
                    "achievements": achievements,
                }))?;
                let letter = field(&self.pipeline.send_json(request).await?, "letter");
                update(&self.state, |state| state.reference_letter = Some(letter.clone()));
                Ok(letter)
            })
            .await
    }

    pub async fn generate_employment_proof(&self, employee_id: i64) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::EMPLOYEE_EMPLOYMENT_PROOF)
                    .json(&json!({ "employee_id": employee_id }))?;
                let document = field(&self.pipeline.send_json(request).await?, "document");
                update(&self.state, |state| state.employment_proof = Some(document.clone()));
                Ok(document)
            })
            .await
    }
}
