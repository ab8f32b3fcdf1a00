//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage and search into the public note store API.
//! - Own the failure-containment policy for reads and writes.

pub mod note_store;
