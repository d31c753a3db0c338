//! Application model types: `App` and `PlaybackState`.
//!
//! `App` mirrors what the UI shows: the playlist, the list selection and
//! the last known playback state reported by the engine.

use std::time::Duration;

use crate::library::Track;
use crate::playback::{PlaybackEvent, RepeatMode};

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub now_playing: Option<usize>,
    pub playback: PlaybackState,

    pub shuffle: bool,
    pub repeat_mode: RepeatMode,
    pub volume_percent: u8,
    pub position: Duration,
    pub duration: Option<Duration>,

    pub follow_playback: bool,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` showing `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            now_playing: None,
            playback: PlaybackState::Stopped,
            shuffle: false,
            repeat_mode: RepeatMode::None,
            volume_percent: 100,
            position: Duration::ZERO,
            duration: None,
            follow_playback: true,
            current_dir: None,
        }
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn now_playing_track(&self) -> Option<&Track> {
        self.now_playing.and_then(|i| self.tracks.get(i))
    }

    /// Fold one engine event into the view.
    pub fn apply(&mut self, event: &PlaybackEvent) {
        match *event {
            PlaybackEvent::PlaylistLoaded { .. } => {
                self.now_playing = None;
                self.playback = PlaybackState::Stopped;
                self.position = Duration::ZERO;
                self.duration = None;
            }
            PlaybackEvent::TrackChanged { index } => {
                self.now_playing = Some(index);
                self.position = Duration::ZERO;
                self.duration = None;
                if self.follow_playback && index < self.tracks.len() {
                    self.selected = index;
                }
            }
            PlaybackEvent::PlayStateChanged { playing } => {
                self.playback = if playing {
                    PlaybackState::Playing
                } else if self.now_playing.is_some() && self.playback != PlaybackState::Stopped {
                    PlaybackState::Paused
                } else {
                    PlaybackState::Stopped
                };
            }
            PlaybackEvent::ShuffleChanged { enabled } => self.shuffle = enabled,
            PlaybackEvent::RepeatModeChanged { mode } => self.repeat_mode = mode,
            PlaybackEvent::Seeked { position } => self.position = position,
            PlaybackEvent::VolumeChanged { level } => {
                self.volume_percent = (level * 100.0).round() as u8;
            }
            PlaybackEvent::Progress { position, duration } => {
                self.position = position;
                self.duration = duration;
            }
            PlaybackEvent::Stopped => self.playback = PlaybackState::Stopped,
        }
    }

    /// Fraction of the current track already played, for the progress bar.
    pub fn progress_ratio(&self) -> f64 {
        match self.duration {
            Some(total) if !total.is_zero() => {
                (self.position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Enable following playback (cursor follows currently playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    /// Disable follow-playback.
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move selection to the next track, wrapping to the first.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move selection to the previous track, wrapping to the last.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            let len = self.tracks.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }
}
