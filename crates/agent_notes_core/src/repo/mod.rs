//! Storage strategies for the note collection.
//!
//! # Responsibility
//! - Define the load/persist contract shared by every storage strategy.
//! - Isolate file-system and JSON encoding details from the store service.
//!
//! # Invariants
//! - A missing backing document loads as an empty collection.
//! - Storage never decides capacity policy; the service does.

pub mod file_storage;
pub mod memory_storage;
pub mod note_storage;
