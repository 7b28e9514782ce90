//! Employee feedback sentiment.

use super::{list_field, read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::http::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentState {
    pub analysis: Option<Value>,
    pub trends: Vec<Value>,
    pub themes: Vec<Value>,
}

pub struct SentimentStore {
    pipeline: Arc<RequestPipeline>,
    state: RwLock<SentimentState>,
    status: StoreStatus,
}

impl SentimentStore {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self {
            pipeline,
            state: RwLock::new(SentimentState::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn state(&self) -> SentimentState {
        read(&self.state)
    }

    pub async fn analyze(&self, feedback: &str) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::SENTIMENT_ANALYZE)
                    .json(&json!({ "feedback": feedback }))?;
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| state.analysis = Some(body.clone()));
                Ok(body)
            })
            .await
    }

    pub async fn fetch_trends(&self) -> Result<Vec<Value>> {
        self.status
            .track(async {
                let request = ApiRequest::get(endpoints::SENTIMENT_TREND);
                let body = self.pipeline.send_json(request).await?;
                let trends = list_field(&body, "trends");
                update(&self.state, |state| state.trends = trends.clone());
                Ok(trends)
            })
            .await
    }

    pub async fn fetch_themes(&self) -> Result<Vec<Value>> {
        self.status
            .track(async {
                let request = ApiRequest::get(endpoints::SENTIMENT_THEMES);
                let body = self.pipeline.send_json(request).await?;
                let themes = list_field(&body, "themes");
                update(&self.state, |state| state.themes = themes.clone());
                Ok(themes)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use talentdesk_core::http::ApiResponse;

    #[tokio::test]
    async fn test_analyze_then_trends() {
        let fixture = Fixture::authenticated("abc");
        let store = SentimentStore::new(fixture.pipeline.clone());
        fixture
            .transport
            .respond(ApiResponse::ok(json!({"sentiment": "positive", "score": 0.8})));
        fixture.transport.respond(ApiResponse::ok(json!({
            "trends": [{"month": "2024-04", "score": 0.4}, {"month": "2024-05", "score": 0.6}]
        })));

        store.analyze("Great onboarding experience").await.unwrap();
        store.fetch_trends().await.unwrap();

        let state = store.state();
        assert_eq!(state.analysis.unwrap()["sentiment"], "positive");
        assert_eq!(state.trends.len(), 2);
        assert_eq!(fixture.transport.last_request().path, "/api/sentiment/trend");
    }
}
