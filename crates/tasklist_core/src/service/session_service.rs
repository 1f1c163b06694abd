//! Task list view session.
//!
//! # Responsibility
//! - Hold UI-local view state around one `TaskListStore`: the new-task
//!   composer, per-task edit drafts and the theme flag.
//! - Produce render-ready snapshots for presentation layers.
//!
//! # Invariants
//! - Drafts never leak into store data until `save_edit` succeeds.
//! - A draft is discarded on save, cancel, or deletion of its task.
//! - Composer resets to empty text and default priority after a submit.
//! - Theme state has no interaction with task state.

use crate::model::task::{Priority, TaskId, TaskItem, TaskPatch};
use crate::model::theme::Theme;
use crate::repo::task_repo::{InMemoryTaskRepository, TaskRepository};
use crate::store::task_store::TaskListStore;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// New-task form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Composer {
    pub text: String,
    pub priority: Priority,
}

impl Composer {
    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// In-progress edit of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditDraft {
    pub text: String,
    pub priority: Priority,
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub priority_label: &'static str,
    /// Present while the row is in edit mode.
    pub draft: Option<EditDraft>,
}

/// Full render snapshot for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub theme: Theme,
    pub theme_toggle_label: &'static str,
    pub composer: Composer,
    pub can_submit: bool,
    pub rows: Vec<TaskRow>,
}

/// View-state container binding user input to a `TaskListStore`.
pub struct TaskListSession<R: TaskRepository = InMemoryTaskRepository> {
    store: TaskListStore<R>,
    theme: Theme,
    composer: Composer,
    drafts: HashMap<TaskId, EditDraft>,
}

impl TaskListSession<InMemoryTaskRepository> {
    /// Creates an empty session with the default (dark) theme.
    pub fn new() -> Self {
        Self::with_store(TaskListStore::new(), Theme::default())
    }
}

impl Default for TaskListSession<InMemoryTaskRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TaskRepository> TaskListSession<R> {
    pub fn with_store(store: TaskListStore<R>, theme: Theme) -> Self {
        Self {
            store,
            theme,
            composer: Composer::default(),
            drafts: HashMap::new(),
        }
    }

    pub fn store(&self) -> &TaskListStore<R> {
        &self.store
    }

    /// Direct access for callers that drive the store themselves.
    pub fn store_mut(&mut self) -> &mut TaskListStore<R> {
        &mut self.store
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn set_composer_text(&mut self, text: impl Into<String>) {
        self.composer.text = text.into();
    }

    pub fn set_composer_priority(&mut self, priority: Priority) {
        self.composer.priority = priority;
    }

    pub fn can_submit(&self) -> bool {
        self.composer.can_submit()
    }

    /// Adds the composed task and resets the form.
    ///
    /// Returns the new task ID, or `None` when the composer is blank (the
    /// draft is then left untouched).
    pub fn submit(&mut self) -> Option<TaskId> {
        if !self.composer.can_submit() {
            return None;
        }
        let before = self.store.len();
        let items = self.store.add(&self.composer.text, self.composer.priority);
        let created = (items.len() > before).then(|| items[items.len() - 1].id);
        self.composer = Composer::default();
        created
    }

    pub fn toggle(&mut self, id: TaskId) -> bool {
        self.store.toggle(id)
    }

    /// Applies `changes` through the store and closes any open draft.
    pub fn update(&mut self, id: TaskId, changes: TaskPatch) -> bool {
        self.drafts.remove(&id);
        self.store.update(id, changes)
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        self.drafts.remove(&id);
        self.store.delete(id)
    }

    /// Opens edit mode seeded from the task's current values.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(item) = self.store.get(id) else {
            return false;
        };
        let draft = EditDraft {
            text: item.text.clone(),
            priority: item.priority,
        };
        self.drafts.insert(id, draft);
        debug!("event=edit_begin module=session status=ok id={id}");
        true
    }

    pub fn draft(&self, id: TaskId) -> Option<&EditDraft> {
        self.drafts.get(&id)
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.drafts.contains_key(&id)
    }

    pub fn set_draft_text(&mut self, id: TaskId, text: impl Into<String>) -> bool {
        match self.drafts.get_mut(&id) {
            Some(draft) => {
                draft.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_draft_priority(&mut self, id: TaskId, priority: Priority) -> bool {
        match self.drafts.get_mut(&id) {
            Some(draft) => {
                draft.priority = priority;
                true
            }
            None => false,
        }
    }

    /// Commits the draft for `id` into the store.
    ///
    /// A blank draft is rejected and stays open. Returns whether the draft
    /// was closed by this call.
    pub fn save_edit(&mut self, id: TaskId) -> bool {
        let Some(draft) = self.drafts.get(&id) else {
            return false;
        };
        let trimmed = draft.text.trim();
        if trimmed.is_empty() {
            debug!("event=edit_save module=session status=skipped reason=blank id={id}");
            return false;
        }
        let patch = TaskPatch {
            text: Some(trimmed.to_string()),
            priority: Some(draft.priority),
        };
        self.drafts.remove(&id);
        let applied = self.store.update(id, patch);
        debug!("event=edit_save module=session status=ok id={id} applied={applied}");
        true
    }

    /// Discards the draft for `id` without touching the store.
    pub fn cancel_edit(&mut self, id: TaskId) -> bool {
        self.drafts.remove(&id).is_some()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        debug!("event=theme_toggle module=session status=ok theme={}", self.theme);
        self.theme
    }

    /// Builds the render snapshot for the current state.
    pub fn view(&self) -> SessionView {
        SessionView {
            theme: self.theme,
            theme_toggle_label: self.theme.toggle_label(),
            composer: self.composer.clone(),
            can_submit: self.composer.can_submit(),
            rows: self.store.items().iter().map(|item| self.row(item)).collect(),
        }
    }

    fn row(&self, item: &TaskItem) -> TaskRow {
        TaskRow {
            id: item.id,
            text: item.text.clone(),
            completed: item.completed,
            priority: item.priority,
            priority_label: item.priority.label(),
            draft: self.drafts.get(&item.id).cloned(),
        }
    }
}
