use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Directory-level and document failures. Any of these aborts the call that hit it.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write playlist document {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read playlist document {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed playlist document {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode playlist document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Tag extraction failed for a single file.
///
/// Never escapes a scan: the file is kept with filename-derived defaults.
#[derive(Debug, Error)]
#[error("cannot read tags from {}: {reason}", path.display())]
pub struct TagError {
    pub path: PathBuf,
    pub reason: String,
}

impl TagError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
