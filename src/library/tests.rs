use super::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::id3::v2::Id3v2Tag;
use lofty::tag::Accessor;
use tempfile::tempdir;

/// In-memory store: directory listings plus per-file tag results.
#[derive(Default)]
struct MemoryStore {
    dirs: HashMap<PathBuf, Vec<String>>,
    tags: HashMap<PathBuf, Result<TagMetadata, String>>,
}

impl MemoryStore {
    fn dir(mut self, dir: &str, files: &[&str]) -> Self {
        self.dirs.insert(
            PathBuf::from(dir),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    fn tagged(mut self, path: &str, title: &str, artist: &str, album: &str) -> Self {
        self.tags.insert(
            PathBuf::from(path),
            Ok(TagMetadata {
                title: Some(title.into()),
                artist: Some(artist.into()),
                album: Some(album.into()),
            }),
        );
        self
    }

    fn corrupt(mut self, path: &str) -> Self {
        self.tags
            .insert(PathBuf::from(path), Err("invalid frame header".into()));
        self
    }
}

impl AudioStore for MemoryStore {
    fn ensure_dir(&self, _dir: &Path) -> Result<(), LibraryError> {
        Ok(())
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, LibraryError> {
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| LibraryError::ReadDir {
                path: dir.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
    }

    fn read_tags(&self, path: &Path) -> Result<TagMetadata, TagError> {
        match self.tags.get(path) {
            Some(Ok(meta)) => Ok(meta.clone()),
            Some(Err(reason)) => Err(TagError::new(path, reason)),
            None => Ok(TagMetadata::default()),
        }
    }
}

fn scan_mem(store: &MemoryStore) -> Result<Playlist, LibraryError> {
    scan(
        store,
        Path::new("music"),
        Path::new("covers"),
        &ScanOptions::default(),
    )
}

#[test]
fn corrupt_file_is_kept_with_filename_defaults() {
    let store = MemoryStore::default()
        .dir("music", &["a.mp3", "broken.mp3", "c.mp3"])
        .dir("covers", &[])
        .tagged("music/a.mp3", "Alpha", "Artist A", "First")
        .corrupt("music/broken.mp3")
        .tagged("music/c.mp3", "Gamma", "Artist C", "Third");

    let playlist = scan_mem(&store).unwrap();
    assert_eq!(playlist.len(), 3);
    assert_eq!(playlist[0].title, "Alpha");
    assert_eq!(playlist[1], Track::from_filename("broken.mp3"));
    assert_eq!(playlist[1].title, "broken");
    assert_eq!(playlist[2].title, "Gamma");
}

#[test]
fn untagged_file_gets_documented_defaults() {
    let store = MemoryStore::default()
        .dir("music", &["track01.mp3"])
        .dir("covers", &["abbey_road.jpg"]);

    let playlist = scan_mem(&store).unwrap();
    assert_eq!(
        playlist,
        vec![Track {
            filename: "track01.mp3".into(),
            title: "track01".into(),
            artist: "Unknown Artist".into(),
            album: "Unknown Album".into(),
            cover: None,
        }]
    );
}

#[test]
fn covers_are_matched_by_album_name() {
    let store = MemoryStore::default()
        .dir("music", &["1.mp3", "2.mp3"])
        .dir("covers", &["abbey_road.jpg", "other.png"])
        .tagged("music/1.mp3", "Something", "The Beatles", "Abbey Road")
        .tagged("music/2.mp3", "Song", "Nobody", "XYZ");

    let playlist = scan_mem(&store).unwrap();
    assert_eq!(playlist[0].cover.as_deref(), Some("/covers/abbey_road.jpg"));
    assert_eq!(playlist[1].cover, None);
}

#[test]
fn corrupt_file_never_gets_a_cover() {
    // "Unknown Album" would otherwise match this cover.
    let store = MemoryStore::default()
        .dir("music", &["x.mp3"])
        .dir("covers", &["unknown_album.jpg"])
        .corrupt("music/x.mp3");

    let playlist = scan_mem(&store).unwrap();
    assert_eq!(playlist[0].cover, None);
}

#[test]
fn listing_order_is_preserved_and_non_audio_dropped() {
    let store = MemoryStore::default()
        .dir("music", &["zz.mp3", "notes.txt", "aa.mp3", "music-data.json"])
        .dir("covers", &[])
        .tagged("music/zz.mp3", "A title", "X", "Y")
        .tagged("music/aa.mp3", "Z title", "X", "Y");

    let playlist = scan_mem(&store).unwrap();
    let names: Vec<&str> = playlist.iter().map(|t| t.filename.as_str()).collect();
    assert_eq!(names, vec!["zz.mp3", "aa.mp3"]);
}

#[test]
fn parallel_extraction_keeps_listing_order() {
    let files: Vec<String> = (0..23).map(|i| format!("{i:02}.mp3")).collect();
    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
    let mut store = MemoryStore::default().dir("music", &refs).dir("covers", &[]);
    for (i, f) in files.iter().enumerate() {
        let title = format!("title {i}");
        store = store.tagged(&format!("music/{f}"), &title, "A", "B");
    }

    let options = ScanOptions {
        workers: 4,
        ..ScanOptions::default()
    };
    let playlist = scan(&store, Path::new("music"), Path::new("covers"), &options).unwrap();
    let titles: Vec<String> = playlist.iter().map(|t| t.title.clone()).collect();
    let expected: Vec<String> = (0..23).map(|i| format!("title {i}")).collect();
    assert_eq!(titles, expected);
}

#[test]
fn unreadable_audio_directory_fails_the_scan() {
    let store = MemoryStore::default().dir("covers", &[]);
    assert!(matches!(scan_mem(&store), Err(LibraryError::ReadDir { .. })));
}

#[test]
fn unreadable_cover_directory_fails_the_scan() {
    let store = MemoryStore::default().dir("music", &["a.mp3"]);
    assert!(matches!(scan_mem(&store), Err(LibraryError::ReadDir { .. })));
}

#[test]
fn fs_scan_creates_directories_and_defaults_unreadable_files() {
    let root = tempdir().unwrap();
    let music = root.path().join("music");
    let covers = root.path().join("covers");

    let playlist = scan(&FsStore::default(), &music, &covers, &ScanOptions::default()).unwrap();
    assert!(playlist.is_empty());
    assert!(music.is_dir());
    assert!(covers.is_dir());

    fs::write(music.join("b.mp3"), b"not a real mp3").unwrap();
    fs::write(music.join("a.MP3"), b"not a real mp3").unwrap();
    fs::write(music.join("c.txt"), b"ignore me").unwrap();
    fs::write(covers.join("unknown.png"), b"png").unwrap();

    let playlist = scan(&FsStore::default(), &music, &covers, &ScanOptions::default()).unwrap();
    assert_eq!(playlist.len(), 2);
    assert_eq!(playlist[0], Track::from_filename("a.MP3"));
    assert_eq!(playlist[0].title, "a");
    assert_eq!(playlist[1], Track::from_filename("b.mp3"));
}

#[test]
fn service_fetch_writes_document_next_to_music() {
    let root = tempdir().unwrap();
    let music = root.path().join("music");
    let covers = root.path().join("covers");
    fs::create_dir_all(&music).unwrap();
    fs::write(music.join("song.mp3"), b"junk").unwrap();

    let doc = music.join("music-data.json");
    let service = PlaylistService::with_store(FsStore::default(), music.clone(), covers)
        .with_document_path(Some(doc.clone()));

    let playlist = service.fetch().unwrap();
    assert_eq!(playlist.len(), 1);
    assert_eq!(load_document(&doc).unwrap(), playlist);

    // The document is not an audio file, so a rescan sees the same single track.
    assert_eq!(service.fetch().unwrap(), playlist);
}

#[test]
fn service_fetch_survives_persist_failure() {
    let store = MemoryStore::default()
        .dir("music", &["a.mp3"])
        .dir("covers", &[]);
    let root = tempdir().unwrap();
    let doc = root.path().join("missing-dir").join("music-data.json");

    let service = PlaylistService::with_store(store, "music".into(), "covers".into())
        .with_document_path(Some(doc.clone()));

    let playlist = service.fetch().unwrap();
    assert_eq!(playlist.len(), 1);
    assert!(!doc.exists());
}

#[test]
fn service_from_settings_places_document_in_audio_dir() {
    let settings = crate::config::LibrarySettings {
        audio_dir: PathBuf::from("/srv/music"),
        ..Default::default()
    };
    let service = PlaylistService::from_settings(&settings);
    assert_eq!(
        service.document_path(),
        Some(Path::new("/srv/music/music-data.json"))
    );

    let settings = crate::config::LibrarySettings {
        persist: false,
        ..Default::default()
    };
    assert_eq!(PlaylistService::from_settings(&settings).document_path(), None);
}

/// A tenth of a second of mono silence, tagged with ID3v2.
fn write_tagged_wav(path: &Path, title: &str, artist: &str, album: &str) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for _ in 0..800 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let mut tagged = lofty::probe::Probe::open(path).unwrap().read().unwrap();
    let mut tag = Id3v2Tag::default();
    tag.set_title(title.to_string());
    tag.set_artist(artist.to_string());
    tag.set_album(album.to_string());
    tagged.insert_tag(tag.into());
    tagged.save_to_path(path, WriteOptions::default()).unwrap();
}

#[test]
fn fs_scan_reads_real_tags_and_keeps_corrupt_file() {
    let root = tempdir().unwrap();
    let music = root.path().join("music");
    let covers = root.path().join("covers");
    fs::create_dir_all(&music).unwrap();
    fs::create_dir_all(&covers).unwrap();

    write_tagged_wav(
        &music.join("01_come_together.wav"),
        "  Come Together  ",
        "The Beatles",
        "Abbey Road",
    );
    write_tagged_wav(&music.join("02_money.wav"), "Money", "Pink Floyd", "   ");
    fs::write(music.join("03_broken.wav"), b"definitely not RIFF").unwrap();
    fs::write(covers.join("abbey_road.jpg"), b"jpg").unwrap();

    let options = ScanOptions {
        extensions: vec!["wav".to_string()],
        ..ScanOptions::default()
    };
    let playlist = scan(&FsStore::default(), &music, &covers, &options).unwrap();

    assert_eq!(playlist.len(), 3);
    assert_eq!(
        playlist[0],
        Track {
            filename: "01_come_together.wav".into(),
            title: "Come Together".into(),
            artist: "The Beatles".into(),
            album: "Abbey Road".into(),
            cover: Some("/covers/abbey_road.jpg".into()),
        }
    );
    assert_eq!(playlist[1].title, "Money");
    assert_eq!(playlist[1].artist, "Pink Floyd");
    assert_eq!(playlist[1].album, "Unknown Album");
    assert_eq!(playlist[1].cover, None);
    assert_eq!(playlist[2], Track::from_filename("03_broken.wav"));
}
