use std::path::Path;

use serde::{Deserialize, Serialize};

/// Artist shown when a file carries no artist tag.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Album shown when a file carries no album tag.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// One playable item of the playlist document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// File name inside the audio directory.
    pub filename: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// URI of the matched cover image, `None` when nothing matched.
    #[serde(default)]
    pub cover: Option<String>,
}

impl Track {
    /// A track whose every field is derived from the file name alone.
    pub fn from_filename(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            title: title_from_filename(filename),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            cover: None,
        }
    }
}

/// Ordered tracks, in audio directory listing order.
pub type Playlist = Vec<Track>;

/// File name with its extension stripped.
pub fn title_from_filename(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}
