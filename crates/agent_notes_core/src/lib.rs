//! Agent note persistence and retrieval engine.
//! Stores small tagged notes for an automated task session and finds them
//! again by keyword or by relevance to free-form context.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{resolve_notes_path, DEFAULT_NOTES_FILE_NAME, MAX_COLLECTION_BYTES};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteCollection, NoteId, COLLECTION_VERSION};
pub use repo::file_storage::FileNoteStorage;
pub use repo::memory_storage::MemoryNoteStorage;
pub use repo::note_storage::{NoteStorage, RepoError, RepoResult};
pub use search::relevance::RELEVANCE_THRESHOLD;
pub use service::note_store::{NoteStore, StoreError, StoreResult};

/// Minimal health-check API for embedding hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
