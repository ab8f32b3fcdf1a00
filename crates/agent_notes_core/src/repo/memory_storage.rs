//! Transient in-memory storage.
//!
//! The collection lives inside the storage value and is dropped with it;
//! there is no process-wide state.

use crate::model::note::NoteCollection;
use crate::repo::note_storage::{NoteStorage, RepoResult};

/// Storage backed purely by process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStorage {
    collection: NoteCollection,
}

impl MemoryNoteStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStorage for MemoryNoteStorage {
    fn load(&self) -> RepoResult<NoteCollection> {
        Ok(self.collection.clone())
    }

    fn persist(&mut self, collection: &NoteCollection) -> RepoResult<()> {
        self.collection = collection.clone();
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
