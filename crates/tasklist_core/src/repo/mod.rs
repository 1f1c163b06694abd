//! Repository layer abstractions.
//!
//! # Responsibility
//! - Define the data access contract used by `TaskListStore`.
//! - Isolate collection bookkeeping from mutation policy.
//!
//! # Invariants
//! - Repositories never validate; `TaskListStore` owns input policy.
//! - Only in-memory storage exists; nothing outlives the session.

pub mod task_repo;
