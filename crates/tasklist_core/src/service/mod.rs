//! Core use-case services.
//!
//! # Responsibility
//! - Bind raw UI input (form text, edit drafts, theme switch) to store calls.
//! - Keep UI/FFI layers decoupled from collection details.

pub mod session_service;
