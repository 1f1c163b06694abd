//! Core domain logic for the task list.
//! This crate is the single source of truth for task invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Priority, TaskId, TaskItem, TaskPatch, TaskValidationError};
pub use model::theme::Theme;
pub use repo::task_repo::{InMemoryTaskRepository, TaskRepository};
pub use service::session_service::{Composer, EditDraft, SessionView, TaskListSession, TaskRow};
pub use store::task_store::{Subscriber, SubscriptionId, TaskListStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
