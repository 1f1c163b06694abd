//! Task list store.
//!
//! # Responsibility
//! - Own the authoritative ordered task collection for the session.
//! - Expose mutation entry points and snapshot observation.

pub mod task_store;
