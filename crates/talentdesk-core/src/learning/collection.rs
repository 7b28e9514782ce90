//! Saved learning paths and the active-path pointer.

use super::model::{
    GeneratedLearningPath, INITIAL_PROGRESS, LearningModule, LearningPlan, ModuleUpdate, PathId,
    SavedLearningPath,
};

/// Result of applying a module completion update locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleUpdateOutcome {
    /// The path is not mirrored locally; nothing changed.
    PathNotFound,
    /// The path has no module at that index; nothing changed.
    ModuleNotFound,
    /// Flag and progress were updated.
    Applied { progress: u32 },
}

/// Saved paths, most recent first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedPathCollection {
    paths: Vec<SavedLearningPath>,
}

impl SavedPathCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: Vec<SavedLearningPath>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedLearningPath> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[SavedLearningPath] {
        &self.paths
    }

    /// The most recently inserted path.
    pub fn most_recent(&self) -> Option<&SavedLearningPath> {
        self.paths.first()
    }

    pub fn get(&self, id: PathId) -> Option<&SavedLearningPath> {
        self.paths.iter().find(|path| path.id == id)
    }

    pub fn get_mut(&mut self, id: PathId) -> Option<&mut SavedLearningPath> {
        self.paths.iter_mut().find(|path| path.id == id)
    }

    pub fn contains(&self, id: PathId) -> bool {
        self.get(id).is_some()
    }

    /// Inserts a path as the most recent entry.
    pub fn insert_front(&mut self, path: SavedLearningPath) {
        self.paths.insert(0, path);
    }

    /// Replaces every entry with a fresh server listing.
    pub fn replace_all(&mut self, paths: Vec<SavedLearningPath>) {
        self.paths = paths;
    }

    /// Mirrors a module completion update into the local copy.
    ///
    /// Progress follows the server when it reports a value. Without one the
    /// previously displayed value is advanced by one, whatever the flag was
    /// set to; the result may drift from the true completed count until the
    /// next full fetch replaces the collection.
    pub fn apply_module_update(
        &mut self,
        update: &ModuleUpdate,
        server_progress: Option<u32>,
    ) -> ModuleUpdateOutcome {
        let Some(path) = self.get_mut(update.path_id) else {
            return ModuleUpdateOutcome::PathNotFound;
        };

        let Some(module) = path.learning_path.modules_mut().get_mut(update.module_index) else {
            return ModuleUpdateOutcome::ModuleNotFound;
        };
        module.completed = update.completed;

        path.progress = match server_progress {
            Some(progress) => progress,
            None => path.progress.saturating_add(1),
        };

        ModuleUpdateOutcome::Applied {
            progress: path.progress,
        }
    }
}

/// What the learning view currently shows.
///
/// Saved paths are referenced by identifier and always resolved through the
/// collection, so there is a single copy to update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActivePath {
    #[default]
    None,
    Saved(PathId),
    /// A generated path the backend did not persist.
    Detached(LearningPlan),
}

/// Resolved view of the active path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView<'a> {
    Saved(&'a SavedLearningPath),
    Detached(&'a LearningPlan),
}

impl<'a> ActiveView<'a> {
    pub fn id(&self) -> Option<PathId> {
        match self {
            ActiveView::Saved(path) => Some(path.id),
            ActiveView::Detached(_) => None,
        }
    }

    pub fn progress(&self) -> Option<u32> {
        match self {
            ActiveView::Saved(path) => Some(path.progress),
            ActiveView::Detached(_) => None,
        }
    }

    pub fn plan(&self) -> &'a LearningPlan {
        match *self {
            ActiveView::Saved(path) => &path.learning_path,
            ActiveView::Detached(plan) => plan,
        }
    }

    pub fn modules(&self) -> &'a [LearningModule] {
        self.plan().modules()
    }
}

/// Saved paths plus the active pointer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LearningPaths {
    pub saved: SavedPathCollection,
    pub active: ActivePath,
}

impl LearningPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the active pointer. A pointer to a path that is no longer in
    /// the collection resolves to nothing.
    pub fn active_view(&self) -> Option<ActiveView<'_>> {
        match &self.active {
            ActivePath::None => None,
            ActivePath::Saved(id) => self.saved.get(*id).map(ActiveView::Saved),
            ActivePath::Detached(plan) => Some(ActiveView::Detached(plan)),
        }
    }

    pub fn has_active(&self) -> bool {
        self.active_view().is_some()
    }

    pub fn select(&mut self, id: PathId) -> bool {
        if self.saved.contains(id) {
            self.active = ActivePath::Saved(id);
            true
        } else {
            false
        }
    }

    /// Installs a fresh server listing.
    ///
    /// When nothing is active, the most recent saved path becomes active.
    pub fn replace_saved(&mut self, paths: Vec<SavedLearningPath>) {
        self.saved.replace_all(paths);
        if !self.has_active()
            && let Some(first) = self.saved.most_recent()
        {
            self.active = ActivePath::Saved(first.id);
        }
    }

    /// Adopts a generator result as the active path.
    ///
    /// Persisted results join the collection as its most recent entry with
    /// the initial progress; unpersisted results stay detached.
    pub fn adopt_generated(&mut self, generated: GeneratedLearningPath, created_at: String) {
        match generated.id {
            Some(id) => {
                let mut saved = SavedLearningPath::new(id, generated.plan, INITIAL_PROGRESS);
                saved.created_at = Some(created_at);
                self.saved.insert_front(saved);
                self.active = ActivePath::Saved(id);
            }
            None => self.active = ActivePath::Detached(generated.plan),
        }
    }

    pub fn apply_module_update(
        &mut self,
        update: &ModuleUpdate,
        server_progress: Option<u32>,
    ) -> ModuleUpdateOutcome {
        self.saved.apply_module_update(update, server_progress)
    }
}
