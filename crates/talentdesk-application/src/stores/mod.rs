//! Domain stores.
//!
//! Every store owns its state slices plus a [`StoreStatus`](crate::status::StoreStatus)
//! and routes all remote calls through the shared request pipeline.

pub mod analytics;
pub mod chat;
pub mod employee;
pub mod learning;
pub mod policy;
pub mod recruitment;
pub mod sentiment;
pub mod wellness;

pub use analytics::{AnalyticsState, AnalyticsStore};
pub use chat::ChatStore;
pub use employee::{EmployeeState, EmployeeStore};
pub use learning::{ActivePathSnapshot, LearningStore};
pub use policy::{PolicyState, PolicyStore};
pub use recruitment::{RecruitmentState, RecruitmentStore, UploadFile};
pub use sentiment::{SentimentState, SentimentStore};
pub use wellness::{WellnessState, WellnessStore};

use serde_json::Value;
use std::sync::RwLock;

/// The array under `field`, empty when absent or not an array.
pub(crate) fn list_field(body: &Value, field: &str) -> Vec<Value> {
    body.get(field)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// The value under `field`, `Null` when absent.
pub(crate) fn field(body: &Value, field: &str) -> Value {
    body.get(field).cloned().unwrap_or(Value::Null)
}

pub(crate) fn read<T: Clone>(lock: &RwLock<T>) -> T {
    lock.read().unwrap_or_else(|e| e.into_inner()).clone()
}

pub(crate) fn update<T, R>(lock: &RwLock<T>, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = lock.write().unwrap_or_else(|e| e.into_inner());
    f(&mut guard)
}
