//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold the ordered task collection behind a storage-agnostic trait.
//! - Keep positional bookkeeping out of the store's use-case logic.
//!
//! # Invariants
//! - `list` returns tasks in insertion order.
//! - `remove` never reorders the remaining tasks.

use crate::model::task::{TaskId, TaskItem};

/// Storage interface for the ordered task collection.
pub trait TaskRepository {
    fn list(&self) -> &[TaskItem];
    fn get(&self, id: TaskId) -> Option<&TaskItem>;
    fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskItem>;
    fn append(&mut self, item: TaskItem);
    fn remove(&mut self, id: TaskId) -> Option<TaskItem>;
}

/// Session-lifetime repository backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    items: Vec<TaskItem>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn list(&self) -> &[TaskItem] {
        &self.items
    }

    fn get(&self, id: TaskId) -> Option<&TaskItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    fn append(&mut self, item: TaskItem) {
        self.items.push(item);
    }

    fn remove(&mut self, id: TaskId) -> Option<TaskItem> {
        let index = self.position(id)?;
        // `Vec::remove` shifts the tail left, keeping relative order.
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTaskRepository, TaskRepository};
    use crate::model::task::{Priority, TaskItem};
    use uuid::Uuid;

    #[test]
    fn remove_keeps_relative_order() {
        let mut repo = InMemoryTaskRepository::new();
        let a = TaskItem::new("a", Priority::Low).unwrap();
        let b = TaskItem::new("b", Priority::Low).unwrap();
        let c = TaskItem::new("c", Priority::Low).unwrap();
        repo.append(a.clone());
        repo.append(b.clone());
        repo.append(c.clone());

        let removed = repo.remove(b.id).unwrap();
        assert_eq!(removed.id, b.id);
        let ids: Vec<_> = repo.list().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn remove_missing_returns_none() {
        let mut repo = InMemoryTaskRepository::new();
        repo.append(TaskItem::new("a", Priority::Low).unwrap());
        assert!(repo.remove(Uuid::new_v4()).is_none());
        assert_eq!(repo.list().len(), 1);
    }
}
