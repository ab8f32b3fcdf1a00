//! Durable single-file JSON storage.
//!
//! # Responsibility
//! - Read and replace one JSON document holding the whole collection.
//! - Create the document and its parent directory lazily on first write.
//!
//! # Invariants
//! - Writes go to a temp file in the target directory, then rename over the
//!   document, so readers never observe a half-written file.
//! - Concurrent writers are last-writer-wins.

use crate::config::resolve_notes_path;
use crate::model::note::NoteCollection;
use crate::repo::note_storage::{
    decode_collection, encode_collection, NoteStorage, RepoError, RepoResult,
};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage backed by a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileNoteStorage {
    path: PathBuf,
}

impl FileNoteStorage {
    /// Uses `path` as the backing document verbatim.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves an opaque location (directory or `.json` file) first.
    ///
    /// # Errors
    /// - Returns an error when `location` is blank.
    pub fn from_location(location: &str) -> Result<Self, String> {
        resolve_notes_path(location).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl NoteStorage for FileNoteStorage {
    fn load(&self) -> RepoResult<NoteCollection> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=notes_load module=file_storage status=missing path={}",
                    self.path.display()
                );
                return Ok(NoteCollection::default());
            }
            Err(err) => return Err(RepoError::io(&self.path, err)),
        };

        decode_collection(&bytes).map_err(|source| RepoError::InvalidData {
            path: Some(self.path.clone()),
            source,
        })
    }

    fn persist(&mut self, collection: &NoteCollection) -> RepoResult<()> {
        let encoded = encode_collection(collection)?;
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|err| RepoError::io(dir, err))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| RepoError::io(dir, err))?;
        staged
            .write_all(&encoded)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| RepoError::io(&self.path, err))?;
        staged
            .persist(&self.path)
            .map_err(|err| RepoError::io(&self.path, err.error))?;

        debug!(
            "event=notes_persist module=file_storage status=ok bytes={} notes={}",
            encoded.len(),
            collection.len()
        );
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::FileNoteStorage;
    use crate::model::note::{Note, NoteCollection};
    use crate::repo::note_storage::{NoteStorage, RepoError};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty_collection() {
        let dir = TempDir::new().unwrap();
        let storage = FileNoteStorage::new(dir.path().join("absent.json"));
        let loaded = storage.load().unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.version, 1);
    }

    #[test]
    fn corrupt_file_reports_invalid_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let err = FileNoteStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData { .. }));
    }

    #[test]
    fn persist_creates_nested_directories_lazily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("notes.json");
        let mut storage = FileNoteStorage::new(&path);
        assert!(!path.exists());

        let mut collection = NoteCollection::default();
        let mut note = Note::new("t", ["c"]);
        note.id = "n1".to_string();
        collection.upsert(note);
        storage.persist(&collection).unwrap();

        assert!(path.exists());
        assert_eq!(storage.load().unwrap(), collection);
    }

    #[test]
    fn persist_leaves_no_staging_files_behind() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileNoteStorage::new(dir.path().join("notes.json"));
        storage.persist(&NoteCollection::default()).unwrap();
        storage.persist(&NoteCollection::default()).unwrap();

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn from_location_rejects_blank_input() {
        assert!(FileNoteStorage::from_location("  ").is_err());
    }
}
