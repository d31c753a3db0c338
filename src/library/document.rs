//! The playlist document: the JSON array shared between scanner and player.

use std::fs;
use std::path::Path;

use super::error::LibraryError;
use super::model::{Playlist, Track};

/// Pretty-printed JSON for `playlist`.
pub fn to_document(playlist: &[Track]) -> Result<String, LibraryError> {
    Ok(serde_json::to_string_pretty(playlist)?)
}

/// Write `playlist` to `path`, replacing whatever was there.
pub fn persist(playlist: &[Track], path: &Path) -> Result<(), LibraryError> {
    let json = to_document(playlist)?;
    fs::write(path, json).map_err(|source| LibraryError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a playlist document written by [`persist`].
pub fn load_document(path: &Path) -> Result<Playlist, LibraryError> {
    let json = fs::read_to_string(path).map_err(|source| LibraryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| LibraryError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
