//! Note and collection domain model.
//!
//! # Responsibility
//! - Define the canonical note record written by agents during a session.
//! - Provide id-unique upsert semantics for the owning collection.
//!
//! # Invariants
//! - `NoteCollection::upsert` replaces in place on id match, else appends.
//! - `relevance_score` is populated only by relevance search output.
//! - `version` is always stamped to [`COLLECTION_VERSION`] after load.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Schema version written with every collection.
pub const COLLECTION_VERSION: u32 = 1;

/// Stable note identifier as stored on disk.
pub type NoteId = String;

/// Single agent note.
///
/// Field names serialize in camelCase to match the persisted document
/// (`taskIds`, `lastAccessed`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Empty until the store assigns one on first save.
    #[serde(default)]
    pub id: NoteId,
    pub title: String,
    /// Ordered text lines.
    #[serde(default)]
    pub content: Vec<String>,
    /// Search-only labels. Duplicates are harmless.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque task association list.
    #[serde(default)]
    pub task_ids: Vec<String>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    /// Last access time in epoch milliseconds.
    #[serde(default)]
    pub last_accessed: i64,
    /// Set only on notes returned by relevance search.
    #[serde(skip)]
    pub relevance_score: Option<f64>,
}

impl Note {
    /// Creates an unsaved note with both timestamps set to now.
    pub fn new<I, S>(title: impl Into<String>, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = now_epoch_ms();
        Self {
            id: NoteId::new(),
            title: title.into(),
            content: content.into_iter().map(Into::into).collect(),
            tags: Vec::new(),
            task_ids: Vec::new(),
            timestamp: now,
            last_accessed: now,
            relevance_score: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_task_ids<I, S>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task_ids = task_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Returns whether the note already carries a non-blank id.
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Title, content lines and tags joined by single spaces.
    ///
    /// Both search algorithms read note text through this projection.
    pub fn searchable_text(&self) -> String {
        let mut parts = Vec::with_capacity(1 + self.content.len() + self.tags.len());
        parts.push(self.title.as_str());
        parts.extend(self.content.iter().map(String::as_str));
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Versioned, insertion-ordered note collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCollection {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for NoteCollection {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            version: COLLECTION_VERSION,
        }
    }
}

impl NoteCollection {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Replaces the note with the same id in place, or appends it.
    ///
    /// Returns `true` when an existing note was replaced.
    pub fn upsert(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => {
                *existing = note;
                true
            }
            None => {
                self.notes.push(note);
                false
            }
        }
    }

    /// Stamps the current schema version.
    ///
    /// Returns the previous version when it differed.
    pub fn stamp_version(&mut self) -> Option<u32> {
        if self.version == COLLECTION_VERSION {
            return None;
        }
        let previous = self.version;
        self.version = COLLECTION_VERSION;
        Some(previous)
    }
}

fn default_version() -> u32 {
    COLLECTION_VERSION
}

/// Generates a fresh collision-resistant note id.
pub fn generate_note_id() -> NoteId {
    Uuid::new_v4().to_string()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
