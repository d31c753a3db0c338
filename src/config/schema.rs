use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/folderplay/config.toml` or `~/.config/folderplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `FOLDERPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned for audio files.
    pub audio_dir: PathBuf,
    /// Directory holding cover images.
    pub cover_dir: PathBuf,
    /// File extensions to treat as audio (case-insensitive, dot optional).
    pub extensions: Vec<String>,
    /// Whether dotfiles are listed.
    pub include_hidden: bool,
    /// Prefix of the cover URIs written to the playlist document.
    pub cover_url_prefix: String,
    /// Playlist document file name, relative to `audio_dir`.
    pub document_file: PathBuf,
    /// Whether each scan rewrites the playlist document.
    pub persist: bool,
    /// Threads used to read tags.
    pub scan_workers: usize,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("music"),
            cover_dir: PathBuf::from("covers"),
            extensions: vec!["mp3".into()],
            include_hidden: false,
            cover_url_prefix: "/covers".to_string(),
            document_file: PathBuf::from("music-data.json"),
            persist: true,
            scan_workers: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Repeat mode at startup.
    pub repeat_mode: RepeatModeSetting,
    /// Initial volume, 0-100.
    pub volume: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat_mode: RepeatModeSetting::None,
            volume: 100,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatModeSetting {
    #[serde(alias = "off", alias = "no-loop", alias = "no_loop")]
    None,
    #[serde(alias = "repeat-one", alias = "loop-one", alias = "loop_one")]
    One,
    #[serde(alias = "repeat-all", alias = "loop-all", alias = "loop_all")]
    All,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press, in percent.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the list selection follows the playing track.
    pub follow_playback: bool,
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            follow_playback: true,
            header_text: " ~ folderplay ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset, e.g. `info` or `folderplay=debug`.
    pub level: String,
    /// Log file. The terminal player only logs when this is set.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
