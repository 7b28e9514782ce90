//! Learning paths: generation, saved-path sync and module completion.

use super::{field, list_field, read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::{LoadingFlag, StoreStatus};
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::clock::Clock;
use talentdesk_core::http::ApiRequest;
use talentdesk_core::learning::{
    GeneratedLearningPath, LearningPaths, LearningPlan, ModuleUpdate, ModuleUpdateOutcome, PathId,
    SavedLearningPath, progress_from_value,
};

/// Owned copy of the active path as a view would render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePathSnapshot {
    /// `None` for a generated path the server did not persist.
    pub id: Option<PathId>,
    pub progress: Option<u32>,
    pub plan: LearningPlan,
}

pub struct LearningStore {
    pipeline: Arc<RequestPipeline>,
    clock: Arc<dyn Clock>,
    paths: RwLock<LearningPaths>,
    progress: RwLock<Value>,
    roles: RwLock<Vec<Value>>,
    goals: RwLock<Vec<Value>>,
    status: StoreStatus,
    loading_paths: LoadingFlag,
    generating: LoadingFlag,
}

impl LearningStore {
    pub fn new(pipeline: Arc<RequestPipeline>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pipeline,
            clock,
            paths: RwLock::new(LearningPaths::new()),
            progress: RwLock::new(Value::Null),
            roles: RwLock::new(Vec::new()),
            goals: RwLock::new(Vec::new()),
            status: StoreStatus::new(),
            loading_paths: LoadingFlag::default(),
            generating: LoadingFlag::default(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn is_loading_paths(&self) -> bool {
        self.loading_paths.get()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.get()
    }

    pub fn saved_paths(&self) -> Vec<SavedLearningPath> {
        self.paths
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .saved
            .as_slice()
            .to_vec()
    }

    pub fn active_path(&self) -> Option<ActivePathSnapshot> {
        let paths = self.paths.read().unwrap_or_else(|e| e.into_inner());
        paths.active_view().map(|view| ActivePathSnapshot {
            id: view.id(),
            progress: view.progress(),
            plan: view.plan().clone(),
        })
    }

    /// Makes a saved path the active one. Unknown ids leave the selection as is.
    pub fn select_path(&self, id: PathId) -> bool {
        update(&self.paths, |paths| paths.select(id))
    }

    pub fn progress(&self) -> Value {
        read(&self.progress)
    }

    pub fn roles(&self) -> Vec<Value> {
        read(&self.roles)
    }

    pub fn goals(&self) -> Vec<Value> {
        read(&self.goals)
    }

    /// Generates a path for a role/goal pair.
    ///
    /// A persisted result (one carrying an `id`) is added to the front of the
    /// saved paths with progress 1; either way it becomes the active path.
    pub async fn generate_learning_path(
        &self,
        current_role: &str,
        career_goal: &str,
        employee_id: Option<i64>,
    ) -> Result<GeneratedLearningPath> {
        self.status
            .track_with(&self.generating, async {
                let request = ApiRequest::post(endpoints::LEARNING_GENERATE).json(&json!({
                    "current_role": current_role,
                    "career_goal": career_goal,
                    "employee_id": employee_id,
                }))?;
                let generated: GeneratedLearningPath = self.pipeline.send_as(request).await?;

                let created_at = self.clock.now_rfc3339();
                update(&self.paths, |paths| paths.adopt_generated(generated.clone(), created_at));
                tracing::info!(path_id = ?generated.id, "Learning path generated");
                Ok(generated)
            })
            .await
    }

    /// Replaces the saved paths with the server's list.
    ///
    /// When nothing is active yet, the most recent path becomes active.
    /// Returns the raw response body.
    pub async fn fetch_saved_paths(&self, employee_id: i64) -> Result<Value> {
        self.status
            .track_with(&self.loading_paths, async {
                let body = self
                    .pipeline
                    .send_json(ApiRequest::get(endpoints::learning_paths(employee_id)))
                    .await?;

                if let Some(list) = body.get("learning_paths").filter(|list| !list.is_null()) {
                    let saved: Vec<SavedLearningPath> = serde_json::from_value(list.clone())?;
                    tracing::debug!(count = saved.len(), "Saved learning paths fetched");
                    update(&self.paths, |paths| paths.replace_saved(saved));
                }
                Ok(body)
            })
            .await
    }

    /// Marks one module of a saved path and reconciles progress.
    ///
    /// Progress comes from the response when it carries a numeric
    /// `progress`; otherwise the previous value is floored and incremented.
    /// An unknown path or module index changes nothing locally.
    pub async fn update_module(
        &self,
        path_id: PathId,
        module_index: usize,
        completed: bool,
    ) -> Result<Value> {
        self.status
            .track(async {
                let module_update = ModuleUpdate {
                    path_id,
                    module_index,
                    completed,
                };
                let request =
                    ApiRequest::patch(endpoints::LEARNING_MODULE_UPDATE).json(&module_update)?;
                let body = self.pipeline.send_json(request).await?;

                let server_progress = body.get("progress").and_then(progress_from_value);
                let outcome = update(&self.paths, |paths| {
                    paths.apply_module_update(&module_update, server_progress)
                });
                match outcome {
                    ModuleUpdateOutcome::Applied { progress } => {
                        tracing::debug!(path_id, module_index, progress, "Module update applied")
                    }
                    other => tracing::debug!(
                        path_id,
                        module_index,
                        ?other,
                        "Module update not applied locally"
                    ),
                }
                Ok(body)
            })
            .await
    }

    pub async fn fetch_learning_progress(&self, employee_id: i64) -> Result<Value> {
        self.status
            .track(async {
                let body = self
                    .pipeline
                    .send_json(ApiRequest::get(endpoints::learning_progress(employee_id)))
                    .await?;
                let progress = field(&body, "progress");
                update(&self.progress, |slot| *slot = progress.clone());
                Ok(progress)
            })
            .await
    }

    pub async fn complete_module(&self, module_id: i64) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::patch(endpoints::LEARNING_MODULE_COMPLETE)
                    .json(&json!({ "module_id": module_id }))?;
                self.pipeline.send_json(request).await
            })
            .await
    }

    pub async fn update_training_status(&self, training_id: i64, status: &str) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::patch(endpoints::LEARNING_TRAINING_STATUS).json(&json!({
                    "training_id": training_id,
                    "status": status,
                }))?;
                self.pipeline.send_json(request).await
            })
            .await
    }

    pub async fn fetch_roles_and_goals(&self) -> Result<Value> {
        self.status
            .track(async {
                let body = self
                    .pipeline
                    .send_json(ApiRequest::get(endpoints::LEARNING_ROLES_GOALS))
                    .await?;
                update(&self.roles, |roles| *roles = list_field(&body, "roles"));
                update(&self.goals, |goals| *goals = list_field(&body, "goals"));
                Ok(body)
            })
            .await
    }
}
