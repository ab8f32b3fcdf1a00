//! Storage location and capacity configuration.
//!
//! # Responsibility
//! - Turn the caller-supplied storage location into a backing file path.
//! - Hold the crate-wide storage constants.
//!
//! # Invariants
//! - A location ending in `.json` names the document directly.
//! - Any other location is a directory holding [`DEFAULT_NOTES_FILE_NAME`].

use std::path::{Path, PathBuf};

/// Document name used when the location is a directory.
pub const DEFAULT_NOTES_FILE_NAME: &str = "agent-notes.json";

/// Upper bound for the encoded collection, in bytes.
pub const MAX_COLLECTION_BYTES: usize = 1024 * 1024;

/// Resolves the backing document path for a storage location.
///
/// # Errors
/// - Returns an error when `location` is empty or whitespace.
pub fn resolve_notes_path(location: &str) -> Result<PathBuf, String> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err("storage location cannot be empty".to_string());
    }

    let path = Path::new(trimmed);
    let names_document = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if names_document {
        Ok(path.to_path_buf())
    } else {
        Ok(path.join(DEFAULT_NOTES_FILE_NAME))
    }
}
