use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::LibrarySettings;

use super::document::persist;
use super::error::LibraryError;
use super::model::Playlist;
use super::scan::{ScanOptions, scan};
use super::store::{AudioStore, FsStore};

/// Answers "what is the playlist right now?" by rescanning on every call.
///
/// When a document path is set, each fresh playlist is also written there.
/// That file is only a cache; a failed write is logged and the in-memory
/// playlist is still returned.
pub struct PlaylistService<S: AudioStore = FsStore> {
    store: S,
    audio_dir: PathBuf,
    cover_dir: PathBuf,
    document_path: Option<PathBuf>,
    options: ScanOptions,
}

impl PlaylistService<FsStore> {
    pub fn from_settings(settings: &LibrarySettings) -> Self {
        let document_path = settings
            .persist
            .then(|| settings.audio_dir.join(&settings.document_file));

        Self {
            store: FsStore::new(settings.include_hidden),
            audio_dir: settings.audio_dir.clone(),
            cover_dir: settings.cover_dir.clone(),
            document_path,
            options: ScanOptions::from(settings),
        }
    }
}

#[cfg(test)]
impl<S: AudioStore> PlaylistService<S> {
    pub fn with_store(store: S, audio_dir: PathBuf, cover_dir: PathBuf) -> Self {
        Self {
            store,
            audio_dir,
            cover_dir,
            document_path: None,
            options: ScanOptions::default(),
        }
    }

    pub fn document_path(&self) -> Option<&std::path::Path> {
        self.document_path.as_deref()
    }
}

impl<S: AudioStore> PlaylistService<S> {
    pub fn with_document_path(mut self, path: Option<PathBuf>) -> Self {
        self.document_path = path;
        self
    }

    /// Rescan and, if configured, refresh the persisted document.
    pub fn fetch(&self) -> Result<Playlist, LibraryError> {
        let playlist = scan(&self.store, &self.audio_dir, &self.cover_dir, &self.options)?;

        if let Some(path) = &self.document_path {
            match persist(&playlist, path) {
                Ok(()) => info!(path = %path.display(), tracks = playlist.len(), "wrote playlist document"),
                Err(err) => warn!(error = %err, "could not persist playlist document"),
            }
        }

        Ok(playlist)
    }
}
