//! Authoritative task list store.
//!
//! # Responsibility
//! - Provide the only sanctioned mutation entry points for tasks.
//! - Notify subscribers with the current snapshot after each applied change.
//!
//! # Invariants
//! - Insertion order is display order; only `delete` removes entries.
//! - Operations never fail. Blank text on `add` and unknown IDs elsewhere
//!   are silent no-ops and do not notify subscribers.
//! - `update` does not re-check text emptiness; callers validate drafts.

use crate::model::task::{Priority, TaskId, TaskItem, TaskPatch};
use crate::repo::task_repo::{InMemoryTaskRepository, TaskRepository};
use log::debug;

/// Callback invoked with the ordered snapshot after every applied mutation.
pub type Subscriber = Box<dyn FnMut(&[TaskItem]) + Send>;

/// Handle returned by `subscribe`, used to detach a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered in-memory task collection plus its mutation operations.
pub struct TaskListStore<R: TaskRepository = InMemoryTaskRepository> {
    repo: R,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl TaskListStore<InMemoryTaskRepository> {
    /// Creates an empty store backed by in-memory storage.
    pub fn new() -> Self {
        Self::with_repository(InMemoryTaskRepository::new())
    }
}

impl Default for TaskListStore<InMemoryTaskRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TaskRepository> TaskListStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Appends a new incomplete task and returns the updated snapshot.
    ///
    /// # Contract
    /// - `text` is trimmed; blank input leaves the collection unchanged.
    /// - The new task gets a fresh ID and `completed = false`.
    pub fn add(&mut self, text: &str, priority: Priority) -> &[TaskItem] {
        match TaskItem::new(text, priority) {
            Ok(item) => {
                debug!(
                    "event=task_add module=store status=ok id={} priority={}",
                    item.id, item.priority
                );
                self.repo.append(item);
                self.notify();
            }
            Err(err) => {
                debug!("event=task_add module=store status=skipped reason={err}");
            }
        }
        self.repo.list()
    }

    /// Flips `completed` on the task with `id`.
    ///
    /// Returns whether a task was found.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(item) = self.repo.get_mut(id) else {
            debug!("event=task_toggle module=store status=missing id={id}");
            return false;
        };
        item.completed = !item.completed;
        debug!(
            "event=task_toggle module=store status=ok id={id} completed={}",
            item.completed
        );
        self.notify();
        true
    }

    /// Merges `changes` into the task with `id`.
    ///
    /// Returns whether a task was found.
    pub fn update(&mut self, id: TaskId, changes: TaskPatch) -> bool {
        let Some(item) = self.repo.get_mut(id) else {
            debug!("event=task_update module=store status=missing id={id}");
            return false;
        };
        let text_changed = changes.text.is_some();
        item.apply(changes);
        debug!(
            "event=task_update module=store status=ok id={id} text_changed={text_changed} priority={}",
            item.priority
        );
        self.notify();
        true
    }

    /// Removes the task with `id`.
    ///
    /// Returns whether a task was found.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if self.repo.remove(id).is_none() {
            debug!("event=task_delete module=store status=missing id={id}");
            return false;
        }
        debug!(
            "event=task_delete module=store status=ok id={id} remaining={}",
            self.repo.list().len()
        );
        self.notify();
        true
    }

    /// Current ordered snapshot.
    pub fn items(&self) -> &[TaskItem] {
        self.repo.list()
    }

    /// Owned copy of the current snapshot.
    pub fn snapshot(&self) -> Vec<TaskItem> {
        self.repo.list().to_vec()
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskItem> {
        self.repo.get(id)
    }

    pub fn len(&self) -> usize {
        self.repo.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.list().is_empty()
    }

    /// Registers a callback fired after every applied mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&[TaskItem]) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Detaches a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(registered, _)| *registered != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        let items = self.repo.list();
        for (_, callback) in &mut self.subscribers {
            callback(items);
        }
    }
}
