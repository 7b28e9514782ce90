//! Learning path domain module.
//!
//! - `model`: wire mirrors of generated and saved learning paths
//! - `collection`: saved-path collection, active pointer and module-update reconciliation

mod collection;
mod model;

pub use collection::{
    ActivePath, ActiveView, LearningPaths, ModuleUpdateOutcome, SavedPathCollection,
};
pub use model::{
    GeneratedLearningPath, INITIAL_PROGRESS, LearningModule, LearningPlan, ModuleUpdate, PathId,
    SavedLearningPath, progress_from_value,
};
