use std::panic;
use std::path::Path;
use std::thread;

use tracing::{info, warn};

use crate::config::LibrarySettings;

use super::covers::{CoverIndex, cover_reference};
use super::error::{LibraryError, TagError};
use super::model::{Playlist, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, title_from_filename};
use super::store::{AudioStore, TagMetadata};

/// Knobs for a single scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Audio file extensions, case-insensitive, with or without the dot.
    pub extensions: Vec<String>,
    /// Prefix of the cover URIs written into the playlist.
    pub cover_url_prefix: String,
    /// Threads used for tag extraction.
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            cover_url_prefix: "/covers".into(),
            workers: 4,
        }
    }
}

impl From<&LibrarySettings> for ScanOptions {
    fn from(settings: &LibrarySettings) -> Self {
        Self {
            extensions: settings.extensions.clone(),
            cover_url_prefix: settings.cover_url_prefix.clone(),
            workers: settings.scan_workers,
        }
    }
}

fn is_audio_file(filename: &str, extensions: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .filter(|e| !e.is_empty())
                .any(|e| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Build the playlist for `audio_dir`, matching covers from `cover_dir`.
///
/// Both directories are created when missing. A file whose tags cannot be
/// read stays in the playlist with filename-derived fields and no cover.
/// Only directory-level failures are returned as errors.
pub fn scan<S: AudioStore>(
    store: &S,
    audio_dir: &Path,
    cover_dir: &Path,
    options: &ScanOptions,
) -> Result<Playlist, LibraryError> {
    store.ensure_dir(audio_dir)?;
    store.ensure_dir(cover_dir)?;

    let audio_files: Vec<String> = store
        .list_entries(audio_dir)?
        .into_iter()
        .filter(|f| is_audio_file(f, &options.extensions))
        .collect();
    let mut covers = CoverIndex::new(store.list_entries(cover_dir)?);

    let tags = extract_tags(store, audio_dir, &audio_files, options.workers);

    let mut defaulted = 0usize;
    let playlist: Playlist = audio_files
        .iter()
        .zip(tags)
        .map(|(filename, tags)| match tags {
            Ok(meta) => build_track(filename, meta, &mut covers, &options.cover_url_prefix),
            Err(err) => {
                warn!(file = %filename, error = %err, "tag extraction failed, using defaults");
                defaulted += 1;
                Track::from_filename(filename)
            }
        })
        .collect();

    info!(
        audio_dir = %audio_dir.display(),
        tracks = playlist.len(),
        covers = covers.len(),
        with_cover = playlist.iter().filter(|t| t.cover.is_some()).count(),
        defaulted,
        "scan complete"
    );
    Ok(playlist)
}

fn build_track(
    filename: &str,
    meta: TagMetadata,
    covers: &mut CoverIndex,
    cover_url_prefix: &str,
) -> Track {
    let album = meta.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string());
    let cover = covers
        .find(&album)
        .map(|f| cover_reference(cover_url_prefix, f));

    Track {
        filename: filename.to_string(),
        title: meta.title.unwrap_or_else(|| title_from_filename(filename)),
        artist: meta.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album,
        cover,
    }
}

/// Read tags for every file, fanning out over `workers` threads.
///
/// The result is in the same order as `files` no matter which thread finishes first.
fn extract_tags<S: AudioStore>(
    store: &S,
    dir: &Path,
    files: &[String],
    workers: usize,
) -> Vec<Result<TagMetadata, TagError>> {
    let read = |f: &String| store.read_tags(&store.resolve_path(dir, f));

    let workers = workers.clamp(1, files.len().max(1));
    if workers == 1 {
        return files.iter().map(read).collect();
    }

    let chunk = files.len().div_ceil(workers);
    thread::scope(|s| {
        let handles: Vec<_> = files
            .chunks(chunk)
            .map(|part| s.spawn(move || part.iter().map(read).collect::<Vec<_>>()))
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    })
}
