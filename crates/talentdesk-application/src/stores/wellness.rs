//! Wellness content, events and HR wellness programs.

use super::{list_field, read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::clock::Clock;
use talentdesk_core::http::ApiRequest;
use talentdesk_core::storage::KeyValueStore;
use talentdesk_core::wellness::DailyTips;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WellnessState {
    pub resources: Vec<Value>,
    /// The tip shown last, as a one-element list.
    pub tips: Vec<String>,
    pub events: Vec<Value>,
    pub birthdays: Vec<Value>,
}

pub struct WellnessStore {
    pipeline: Arc<RequestPipeline>,
    daily_tips: DailyTips,
    state: RwLock<WellnessState>,
    status: StoreStatus,
}

impl WellnessStore {
    pub fn new(
        pipeline: Arc<RequestPipeline>,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pipeline,
            daily_tips: DailyTips::new(storage, clock),
            state: RwLock::new(WellnessState::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn state(&self) -> WellnessState {
        read(&self.state)
    }

    /// Today's tip for `category`. Never fails and never touches the network.
    ///
    /// Clears the error left by an earlier remote call.
    pub fn daily_tip(&self, category: &str) -> String {
        self.status.clear_error();
        let tip = self.daily_tips.tip_for(category);
        update(&self.state, |state| state.tips = vec![tip.clone()]);
        tip
    }

    pub async fn fetch_resources(&self) -> Result<Vec<Value>> {
        self.fetch_list(endpoints::WELLNESS_RESOURCES, "resources", |state, list| {
            state.resources = list
        })
        .await
    }

    pub async fn fetch_events(&self) -> Result<Vec<Value>> {
        self.fetch_list(endpoints::WELLNESS_EVENTS, "events", |state, list| {
            state.events = list
        })
        .await
    }

    pub async fn register_for_event(&self, employee_id: i64, event_id: i64) -> Result<Value> {
        self.post(
            endpoints::WELLNESS_REGISTER,
            &json!({ "employee_id": employee_id, "event_id": event_id }),
        )
        .await
    }

    pub async fn fetch_hr_resources(&self) -> Result<Vec<Value>> {
        self.fetch_list(endpoints::HR_WELLNESS_RESOURCES, "resources", |state, list| {
            state.resources = list
        })
        .await
    }

    pub async fn create_alert<T: Serialize>(&self, alert: &T) -> Result<Value> {
        self.post(endpoints::HR_WELLNESS_ALERTS, alert).await
    }

    pub async fn track_milestone<T: Serialize>(&self, milestone: &T) -> Result<Value> {
        self.post(endpoints::HR_WELLNESS_MILESTONES, milestone).await
    }

    pub async fn give_award<T: Serialize>(&self, award: &T) -> Result<Value> {
        self.post(endpoints::HR_WELLNESS_AWARDS, award).await
    }

    /// Birthdays in `month` (1-12).
    pub async fn fetch_birthdays(&self, month: u32) -> Result<Vec<Value>> {
        self.status
            .track(async {
                let request =
                    ApiRequest::get(endpoints::HR_WELLNESS_BIRTHDAYS).query("month", month);
                let body = self.pipeline.send_json(request).await?;
                let birthdays = list_field(&body, "birthdays");
                update(&self.state, |state| state.birthdays = birthdays.clone());
                Ok(birthdays)
            })
            .await
    }

    pub async fn create_survey<T: Serialize>(&self, survey: &T) -> Result<Value> {
        self.post(endpoints::HR_WELLNESS_SURVEYS, survey).await
    }

    async fn fetch_list(
        &self,
        path: &str,
        field: &str,
        apply: impl FnOnce(&mut WellnessState, Vec<Value>),
    ) -> Result<Vec<Value>> {
        self.status
            .track(async {
                let body = self.pipeline.send_json(ApiRequest::get(path)).await?;
                let list = list_field(&body, field);
                update(&self.state, |state| apply(state, list.clone()));
                Ok(list)
            })
            .await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(path).json_value(serde_json::to_value(payload)?);
                self.pipeline.send_json(request).await
            })
            .await
    }
}
