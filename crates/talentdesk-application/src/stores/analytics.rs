//! HR analytics dashboards.

use super::{read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::http::ApiRequest;

/// One slot per dashboard; `None` until first fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsState {
    pub summary: Option<Value>,
    pub absenteeism_trends: Option<Value>,
    pub retention_risk: Option<Value>,
    pub training_completion: Option<Value>,
    pub departments: Option<Value>,
    pub overview: Option<Value>,
    pub recruitment: Option<Value>,
    pub training: Option<Value>,
}

type Slot = fn(&mut AnalyticsState) -> &mut Option<Value>;

pub struct AnalyticsStore {
    pipeline: Arc<RequestPipeline>,
    state: RwLock<AnalyticsState>,
    status: StoreStatus,
}

impl AnalyticsStore {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self {
            pipeline,
            state: RwLock::new(AnalyticsState::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn state(&self) -> AnalyticsState {
        read(&self.state)
    }

    pub async fn fetch_summary(&self) -> Result<Value> {
        self.fetch(endpoints::ANALYTICS_SUMMARY, "Failed to fetch summary", |s| &mut s.summary)
            .await
    }

    pub async fn fetch_absenteeism_trends(&self) -> Result<Value> {
        self.fetch(
            endpoints::ANALYTICS_ABSENTEEISM,
            "Failed to fetch absenteeism trends",
            |s| &mut s.absenteeism_trends,
        )
        .await
    }

    pub async fn fetch_retention_risk(&self) -> Result<Value> {
        self.fetch(
            endpoints::ANALYTICS_RETENTION,
            "Failed to fetch retention risk",
            |s| &mut s.retention_risk,
        )
        .await
    }

    pub async fn fetch_training_completion(&self) -> Result<Value> {
        self.fetch(
            endpoints::ANALYTICS_TRAINING_COMPLETION,
            "Failed to fetch training completion",
            |s| &mut s.training_completion,
        )
        .await
    }

    pub async fn fetch_departments(&self) -> Result<Value> {
        self.fetch(endpoints::ANALYTICS_DEPARTMENTS, "Failed to fetch departments", |s| {
            &mut s.departments
        })
        .await
    }

    pub async fn fetch_overview(&self) -> Result<Value> {
        self.fetch(endpoints::ANALYTICS_OVERVIEW, "Failed to fetch overview", |s| &mut s.overview)
            .await
    }

    pub async fn fetch_recruitment_analytics(&self) -> Result<Value> {
        self.fetch(
            endpoints::ANALYTICS_RECRUITMENT,
            "Failed to fetch recruitment analytics",
            |s| &mut s.recruitment,
        )
        .await
    }

    pub async fn fetch_training_analytics(&self) -> Result<Value> {
        self.fetch(
            endpoints::ANALYTICS_TRAINING,
            "Failed to fetch training analytics",
            |s| &mut s.training,
        )
        .await
    }

    async fn fetch(&self, path: &str, fallback: &str, slot: Slot) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::get(path).fallback_message(fallback);
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| *slot(state) = Some(body.clone()));
                Ok(body)
            })
            .await
    }
}
