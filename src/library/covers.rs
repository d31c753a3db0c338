//! Cover image matching.
//!
//! Album names and cover file names are compared after normalisation
//! (lower-cased, everything but ASCII letters and digits removed). A cover
//! matches when either normalised string contains the other, and the first
//! matching cover in listing order wins.

use std::collections::HashMap;

use tracing::debug;

/// Lower-case `name` and keep only ASCII letters and digits.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Bidirectional containment of two normalised names.
///
/// An empty name is contained in every other name, so an album that
/// normalises to nothing takes the first cover.
pub fn names_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// URI under which a cover file is served: `prefix` + `/` + percent-encoded name.
pub fn cover_reference(prefix: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        urlencoding::encode(filename)
    )
}

#[derive(Debug, Clone)]
struct CoverEntry {
    filename: String,
    key: String,
}

/// Cover files of one scan, with a memo from normalised album name to the
/// matched cover. Built once per scan and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct CoverIndex {
    entries: Vec<CoverEntry>,
    by_album: HashMap<String, Option<usize>>,
}

impl CoverIndex {
    /// Index `filenames`, keeping their order for tie-breaking.
    pub fn new<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = filenames
            .into_iter()
            .map(|f| {
                let filename = f.into();
                let key = normalize_name(&filename);
                CoverEntry { filename, key }
            })
            .collect();

        Self {
            entries,
            by_album: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// File name of the first cover matching `album`, if any.
    pub fn find(&mut self, album: &str) -> Option<&str> {
        let album_key = normalize_name(album);
        let entries = &self.entries;
        let hit = *self
            .by_album
            .entry(album_key)
            .or_insert_with_key(|key| {
                let hit = entries.iter().position(|e| names_match(&e.key, key));
                if let Some(i) = hit {
                    debug!(album, cover = %entries[i].filename, "matched cover");
                }
                hit
            });

        hit.map(|i| self.entries[i].filename.as_str())
    }
}
