//! Note store use-case service.
//!
//! # Responsibility
//! - Provide `save`, `list`, `search` and `relevant_notes` over any
//!   [`NoteStorage`] strategy.
//! - Enforce the encoded collection size budget before persisting.
//!
//! # Invariants
//! - `save` checks capacity on the candidate collection, encoded exactly as
//!   it would be persisted, and never persists a rejected candidate.
//! - Read paths never return errors; load failures degrade to an empty
//!   collection at the current version.
//! - `save` only starts from an empty collection when the document is
//!   missing or unparseable; any other read failure aborts the save.
//! - Stored notes never carry a relevance score.

use crate::config::MAX_COLLECTION_BYTES;
use crate::model::note::{generate_note_id, Note, NoteCollection};
use crate::repo::file_storage::FileNoteStorage;
use crate::repo::memory_storage::MemoryNoteStorage;
use crate::repo::note_storage::{encode_collection, NoteStorage, RepoError};
use crate::search::keyword::filter_notes;
use crate::search::relevance::rank_by_relevance;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by [`NoteStore::save`].
#[derive(Debug)]
pub enum StoreError {
    /// Candidate collection encodes larger than the budget.
    ///
    /// The stored collection is unchanged; shrink or split the note.
    CapacityExceeded {
        size_bytes: usize,
        limit_bytes: usize,
    },
    /// Existing document could not be read, or the collection could not be
    /// persisted.
    StorageUnavailable(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded {
                size_bytes,
                limit_bytes,
            } => write!(
                f,
                "note collection would be {size_bytes} bytes, exceeding the {limit_bytes} byte limit"
            ),
            Self::StorageUnavailable(err) => write!(f, "note storage unavailable: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CapacityExceeded { .. } => None,
            Self::StorageUnavailable(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// Note persistence and retrieval facade.
#[derive(Debug)]
pub struct NoteStore<S: NoteStorage> {
    storage: S,
}

impl NoteStore<MemoryNoteStorage> {
    /// Creates a transient store whose notes die with the instance.
    pub fn in_memory() -> Self {
        Self::new(MemoryNoteStorage::new())
    }
}

impl NoteStore<FileNoteStorage> {
    /// Creates a durable store at a directory or `.json` file location.
    ///
    /// Nothing is touched on disk until the first save.
    ///
    /// # Errors
    /// - Returns an error when `location` is blank.
    pub fn open(location: &str) -> Result<Self, String> {
        FileNoteStorage::from_location(location).map(Self::new)
    }
}

impl<S: NoteStorage> NoteStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Upserts one note and returns it with its final id.
    ///
    /// # Contract
    /// - A blank `id` is replaced with a fresh UUID.
    /// - An existing id is replaced in place; otherwise the note is appended.
    /// - A note that cannot be encoded is returned unchanged, unsaved.
    ///
    /// # Errors
    /// - [`StoreError::CapacityExceeded`] when the encoded collection would
    ///   exceed [`MAX_COLLECTION_BYTES`].
    /// - [`StoreError::StorageUnavailable`] when the existing document cannot
    ///   be read, or when persisting fails.
    pub fn save(&mut self, note: Note) -> StoreResult<Note> {
        let started_at = Instant::now();
        let mut collection = self.load_for_save()?;

        let mut stored = note.clone();
        if !stored.has_id() {
            stored.id = generate_note_id();
        }
        stored.relevance_score = None;
        let replaced = collection.upsert(stored.clone());

        let encoded_len = match encode_collection(&collection) {
            Ok(encoded) => encoded.len(),
            Err(err) => {
                warn!(
                    "event=note_save module=store status=skipped storage={} reason=encode_failed error={}",
                    self.storage.kind(),
                    err
                );
                return Ok(note);
            }
        };

        if encoded_len > MAX_COLLECTION_BYTES {
            warn!(
                "event=note_save module=store status=rejected storage={} bytes={} limit={}",
                self.storage.kind(),
                encoded_len,
                MAX_COLLECTION_BYTES
            );
            return Err(StoreError::CapacityExceeded {
                size_bytes: encoded_len,
                limit_bytes: MAX_COLLECTION_BYTES,
            });
        }

        if let Err(err) = self.storage.persist(&collection) {
            error!(
                "event=note_save module=store status=error storage={} duration_ms={} error={}",
                self.storage.kind(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=note_save module=store status=ok storage={} mode={} notes={} bytes={} duration_ms={}",
            self.storage.kind(),
            if replaced { "replace" } else { "append" },
            collection.len(),
            encoded_len,
            started_at.elapsed().as_millis()
        );
        Ok(stored)
    }

    /// Returns a copy of the whole collection.
    pub fn list(&self) -> NoteCollection {
        self.load_or_default()
    }

    /// Returns notes containing every whitespace-separated query term.
    pub fn search(&self, query: &str) -> Vec<Note> {
        filter_notes(self.load_or_default().notes, query)
    }

    /// Returns notes relevant to `context`, best first, scores attached.
    pub fn relevant_notes(&self, context: &str) -> Vec<Note> {
        rank_by_relevance(self.load_or_default().notes, context)
    }

    /// Loads the collection a save will rewrite.
    ///
    /// A corrupt document starts a fresh collection; an unreadable one is
    /// an error, so existing notes are never overwritten blindly.
    fn load_for_save(&self) -> StoreResult<NoteCollection> {
        match self.storage.load() {
            Ok(collection) => Ok(self.stamped(collection)),
            Err(err @ RepoError::InvalidData { .. }) => {
                warn!(
                    "event=notes_load module=store status=degraded storage={} fallback=empty error={}",
                    self.storage.kind(),
                    err
                );
                Ok(NoteCollection::default())
            }
            Err(err) => {
                error!(
                    "event=note_save module=store status=error storage={} reason=load_failed error={}",
                    self.storage.kind(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn load_or_default(&self) -> NoteCollection {
        match self.storage.load() {
            Ok(collection) => self.stamped(collection),
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=degraded storage={} fallback=empty error={}",
                    self.storage.kind(),
                    err
                );
                NoteCollection::default()
            }
        }
    }

    fn stamped(&self, mut collection: NoteCollection) -> NoteCollection {
        if let Some(previous) = collection.stamp_version() {
            warn!(
                "event=notes_load module=store status=version_reset storage={} found={} using={}",
                self.storage.kind(),
                previous,
                collection.version
            );
        }
        collection
    }
}
