//! Filesystem access used by the scanner.
//!
//! The scanner only talks to an [`AudioStore`], so the pipeline can run
//! against an in-memory store in tests. [`FsStore`] is the real one, backed by
//! `walkdir` for listings and `lofty` for tags.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, TaggedFileExt};
use tracing::warn;
use walkdir::WalkDir;

use super::error::{LibraryError, TagError};

/// Tag fields the playlist cares about. Blank values are reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Source of directory listings and embedded tags.
///
/// `Sync` because the scanner reads tags from several threads at once.
pub trait AudioStore: Sync {
    /// Create `dir` if it does not exist yet.
    fn ensure_dir(&self, dir: &Path) -> Result<(), LibraryError>;

    /// Names of the regular files directly inside `dir`, in listing order.
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, LibraryError>;

    fn read_tags(&self, path: &Path) -> Result<TagMetadata, TagError>;

    fn resolve_path(&self, dir: &Path, filename: &str) -> PathBuf {
        dir.join(filename)
    }
}

/// [`AudioStore`] over the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    /// List dotfiles too.
    pub include_hidden: bool,
}

impl FsStore {
    pub fn new(include_hidden: bool) -> Self {
        Self { include_hidden }
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn non_blank(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AudioStore for FsStore {
    fn ensure_dir(&self, dir: &Path) -> Result<(), LibraryError> {
        fs::create_dir_all(dir).map_err(|source| LibraryError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, LibraryError> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut names = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 means the directory itself could not be read.
                Err(err) if err.depth() == 0 => {
                    return Err(LibraryError::ReadDir {
                        path: dir.to_path_buf(),
                        source: io::Error::from(err),
                    });
                }
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if !self.include_hidden && is_hidden(name) {
                continue;
            }
            names.push(name.to_string());
        }
        Ok(names)
    }

    fn read_tags(&self, path: &Path) -> Result<TagMetadata, TagError> {
        let tagged = lofty::read_from_path(path).map_err(|e| TagError::new(path, e))?;

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(TagMetadata::default());
        };

        Ok(TagMetadata {
            title: non_blank(tag.title()),
            artist: non_blank(tag.artist()),
            album: non_blank(tag.album()),
        })
    }
}
