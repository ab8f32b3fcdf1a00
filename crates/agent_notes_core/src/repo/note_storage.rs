//! Storage contract and collection codec.
//!
//! # Responsibility
//! - Declare the `NoteStorage` trait implemented by memory and file backends.
//! - Own the single JSON encoding used both for size accounting and on disk.
//!
//! # Invariants
//! - `encode_collection` is deterministic for equal collections.
//! - Storage errors carry the failing path when one exists.

use crate::model::note::NoteCollection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error for loading and persisting the collection.
#[derive(Debug)]
pub enum RepoError {
    /// Backing medium could not be read, created or written.
    Io { path: PathBuf, source: io::Error },
    /// Backing document exists but is not a valid collection.
    InvalidData {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    /// Collection could not be encoded.
    Encode(serde_json::Error),
}

impl RepoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "note storage I/O failed at `{}`: {source}", path.display())
            }
            Self::InvalidData {
                path: Some(path),
                source,
            } => write!(
                f,
                "invalid note collection document `{}`: {source}",
                path.display()
            ),
            Self::InvalidData { path: None, source } => {
                write!(f, "invalid note collection document: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode note collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidData { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Load/persist contract for one note collection.
pub trait NoteStorage {
    /// Loads the whole collection.
    ///
    /// Missing storage is an empty collection, not an error.
    fn load(&self) -> RepoResult<NoteCollection>;
    /// Replaces the whole stored collection.
    fn persist(&mut self, collection: &NoteCollection) -> RepoResult<()>;
    /// Short label for log events (`memory|file`).
    fn kind(&self) -> &'static str;
}

/// Encodes a collection exactly as it is written to disk.
pub fn encode_collection(collection: &NoteCollection) -> RepoResult<Vec<u8>> {
    serde_json::to_vec_pretty(collection).map_err(RepoError::Encode)
}

/// Decodes a persisted collection document.
pub fn decode_collection(bytes: &[u8]) -> Result<NoteCollection, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection};
    use crate::model::note::{Note, NoteCollection};

    #[test]
    fn encoding_is_pretty_printed_json() {
        let encoded = encode_collection(&NoteCollection::default()).expect("should encode");
        let text = String::from_utf8(encoded).expect("utf-8");
        assert!(text.contains("\n  \"notes\""));
        assert!(text.contains("\"version\": 1"));
    }

    #[test]
    fn decode_reads_back_encoded_notes() {
        let mut collection = NoteCollection::default();
        let mut note = Note::new("title", ["a", "b"]).with_tags(["x"]);
        note.id = "n1".to_string();
        collection.upsert(note.clone());

        let decoded = decode_collection(&encode_collection(&collection).expect("should encode"))
            .expect("should decode");
        assert_eq!(decoded.notes, vec![note]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_collection(b"{not json").is_err());
        assert!(decode_collection(b"").is_err());
    }
}
