//! Domain model for agent notes.
//!
//! # Responsibility
//! - Define the note record and the versioned collection that owns it.
//! - Keep the persisted JSON shape in one place.
//!
//! # Invariants
//! - Every note in a collection has a unique, non-empty `id`.
//! - Relevance scores are transient and never serialized.

pub mod note;
