//! Learning path domain models.
//!
//! Wire records are mirrors of the backend's JSON. Only the fields the
//! client reconciles are typed; everything else rides along in `details`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server identifier of a saved learning path.
pub type PathId = i64;

/// Progress value stamped on a freshly generated path.
pub const INITIAL_PROGRESS: u32 = 1;

/// One module of a learning path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearningModule {
    #[serde(rename = "module_name", alias = "title", default)]
    pub title: String,
    #[serde(rename = "description", alias = "content", default)]
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// The body of a learning path as produced by the generator.
///
/// Records saved by the backend wrap the generator output once more, so the
/// module list may live one level down in `learning_path`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearningPlan {
    #[serde(
        default,
        deserialize_with = "modules_or_placeholder",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub modules: Vec<LearningModule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_path: Option<Box<LearningPlan>>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl LearningPlan {
    pub fn new(modules: Vec<LearningModule>) -> Self {
        Self {
            modules,
            ..Default::default()
        }
    }

    /// The module list, wherever it is nested.
    pub fn modules(&self) -> &[LearningModule] {
        if self.modules.is_empty()
            && let Some(inner) = self.learning_path.as_deref()
        {
            return inner.modules();
        }
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut Vec<LearningModule> {
        if self.modules.is_empty()
            && let Some(inner) = self.learning_path.as_deref_mut()
        {
            return inner.modules_mut();
        }
        &mut self.modules
    }

    pub fn completed_count(&self) -> usize {
        self.modules().iter().filter(|module| module.completed).count()
    }

    pub fn title(&self) -> Option<&str> {
        self.details
            .get("title")
            .and_then(Value::as_str)
            .or_else(|| self.learning_path.as_deref().and_then(LearningPlan::title))
    }
}

/// A learning path persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLearningPath {
    pub id: PathId,
    #[serde(default)]
    pub learning_path: LearningPlan,
    /// Last-known progress. Sourced from the server when it reports one,
    /// otherwise advanced locally; see `SavedPathCollection::apply_module_update`.
    #[serde(default = "initial_progress", deserialize_with = "progress_or_initial")]
    pub progress: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl SavedLearningPath {
    pub fn new(id: PathId, learning_path: LearningPlan, progress: u32) -> Self {
        Self {
            id,
            learning_path,
            progress,
            created_at: None,
            details: Map::new(),
        }
    }
}

/// Response of the path generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedLearningPath {
    /// Present only when the path was persisted for an employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PathId>,
    #[serde(flatten)]
    pub plan: LearningPlan,
}

/// Payload of the module completion update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleUpdate {
    pub path_id: PathId,
    pub module_index: usize,
    pub completed: bool,
}

/// Reads an integer progress out of a JSON value.
///
/// The backend stores progress as a float (`2.0`); fractional values are
/// floored. Non-numeric and negative values read as absent.
pub fn progress_from_value(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.floor() as u32)
}

fn initial_progress() -> u32 {
    INITIAL_PROGRESS
}

fn progress_or_initial<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(progress_from_value(&value).unwrap_or(INITIAL_PROGRESS))
}

/// The generator reports failures by putting a sentence where the module
/// array belongs; anything that is not an array reads as no modules.
fn modules_or_placeholder<'de, D>(deserializer: D) -> Result<Vec<LearningModule>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            serde_json::from_value(Value::Array(items)).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}
