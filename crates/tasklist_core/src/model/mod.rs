//! Domain model for the task list view.
//!
//! # Responsibility
//! - Define canonical task records and their value types.
//! - Define the independent theme flag read by renderers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod task;
pub mod theme;
