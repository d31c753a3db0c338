use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::library::{Playlist, Track};

use super::cursor::{PlaybackCursor, RepeatMode};
use super::events::{EventBus, PlaybackEvent};
use super::shuffle::shuffled_indices;
use super::transport::Transport;

/// Clamp `fraction` into `0.0..=1.0`; NaN counts as the start.
fn clamp_unit(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Sequences a playlist over a [`Transport`].
///
/// Every method runs to completion before the next one is called; the engine
/// is driven by exactly one event source at a time (user commands and
/// [`tick`](Self::tick)). Navigation on an empty playlist does nothing.
pub struct PlaybackEngine<T: Transport> {
    transport: T,
    audio_dir: PathBuf,
    playlist: Playlist,
    cursor: PlaybackCursor,
    source_loaded: bool,
    volume: f32,
    dragging: bool,
    last_progress_secs: Option<u64>,
    rng: StdRng,
    events: EventBus,
}

impl<T: Transport> PlaybackEngine<T> {
    /// An engine with an empty playlist. Track files are resolved against `audio_dir`.
    pub fn new(transport: T, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            audio_dir: audio_dir.into(),
            playlist: Vec::new(),
            cursor: PlaybackCursor::default(),
            source_loaded: false,
            volume: 1.0,
            dragging: false,
            last_progress_secs: None,
            rng: StdRng::from_os_rng(),
            events: EventBus::default(),
        }
    }

    /// Receive every state change from now on.
    pub fn subscribe(&mut self) -> Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.cursor.shuffle_enabled()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.cursor.repeat_mode()
    }

    fn source_path(&self, track: &Track) -> PathBuf {
        self.audio_dir.join(&track.filename)
    }

    fn load_source(&mut self, index: usize) {
        let path = self.source_path(&self.playlist[index]);
        self.transport.load(&path);
        self.source_loaded = true;
        self.last_progress_secs = None;
    }

    /// Replace the playlist and point at its first track without playing it.
    ///
    /// A shuffle order from the previous playlist is regenerated for the new one.
    pub fn load_playlist(&mut self, playlist: Playlist) {
        if self.cursor.is_playing() {
            self.transport.pause();
        }

        self.playlist = playlist;
        self.cursor.reset(self.playlist.len());
        self.source_loaded = false;
        if self.cursor.shuffle_enabled() {
            let order = shuffled_indices(self.playlist.len(), &mut self.rng);
            self.cursor.enable_shuffle(order);
        }

        self.events.emit(PlaybackEvent::PlaylistLoaded {
            len: self.playlist.len(),
        });
        self.events.emit(PlaybackEvent::PlayStateChanged { playing: false });
        if !self.playlist.is_empty() {
            self.load_source(0);
            self.events.emit(PlaybackEvent::TrackChanged { index: 0 });
        }
    }

    /// Start playing the track at `index`. Out-of-range indices are ignored.
    pub fn play_track(&mut self, index: usize) {
        if index >= self.playlist.len() {
            return;
        }

        self.cursor.select(index);
        self.load_source(index);
        self.transport.play();
        self.cursor.set_playing(true);

        self.events.emit(PlaybackEvent::TrackChanged { index });
        self.events.emit(PlaybackEvent::PlayStateChanged { playing: true });
    }

    /// Pause or resume the loaded track without moving its position.
    pub fn toggle_play_pause(&mut self) {
        if !self.source_loaded {
            return;
        }

        let playing = !self.cursor.is_playing();
        if playing {
            self.transport.play();
        } else {
            self.transport.pause();
        }
        self.cursor.set_playing(playing);
        self.events.emit(PlaybackEvent::PlayStateChanged { playing });
    }

    /// Play the following track, wrapping past the end.
    pub fn next(&mut self) {
        if let Some(index) = self.cursor.step(self.playlist.len(), true) {
            self.play_track(index);
        }
    }

    /// Play the preceding track, wrapping past the start.
    pub fn previous(&mut self) {
        if let Some(index) = self.cursor.step(self.playlist.len(), false) {
            self.play_track(index);
        }
    }

    /// Turn shuffle on with a fresh permutation, or off.
    ///
    /// The playing track keeps playing either way; only what `next` and
    /// `previous` pick changes.
    pub fn toggle_shuffle(&mut self) {
        let enabled = !self.cursor.shuffle_enabled();
        if enabled {
            let order = shuffled_indices(self.playlist.len(), &mut self.rng);
            debug!(?order, "shuffle on");
            self.cursor.enable_shuffle(order);
        } else {
            debug!("shuffle off");
            self.cursor.disable_shuffle();
        }
        self.events.emit(PlaybackEvent::ShuffleChanged { enabled });
    }

    /// Advance the repeat mode: none, one, all, none.
    pub fn cycle_repeat_mode(&mut self) {
        let mode = self.cursor.repeat_mode().next();
        self.cursor.set_repeat_mode(mode);
        debug!(?mode, "repeat mode");
        self.events.emit(PlaybackEvent::RepeatModeChanged { mode });
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        if self.cursor.repeat_mode() != mode {
            self.cursor.set_repeat_mode(mode);
            self.events.emit(PlaybackEvent::RepeatModeChanged { mode });
        }
    }

    /// React to the loaded track reaching its natural end.
    ///
    /// Repeat-one replays it from the start. With repeat-all, or with more
    /// than one track regardless of repeat mode, playback moves on to the
    /// next track (wrapping). Otherwise playback stops on the current track.
    pub fn handle_track_end(&mut self) {
        if self.playlist.is_empty() || !self.source_loaded {
            return;
        }

        if self.cursor.repeat_mode() == RepeatMode::One {
            self.transport.seek_to(Duration::ZERO);
            self.transport.play();
            self.cursor.set_playing(true);
            self.last_progress_secs = None;
            self.events.emit(PlaybackEvent::Seeked {
                position: Duration::ZERO,
            });
            self.events.emit(PlaybackEvent::PlayStateChanged { playing: true });
        } else if self.cursor.repeat_mode() == RepeatMode::All || self.playlist.len() > 1 {
            self.next();
        } else {
            self.transport.pause();
            self.cursor.set_playing(false);
            self.events.emit(PlaybackEvent::PlayStateChanged { playing: false });
            self.events.emit(PlaybackEvent::Stopped);
        }
    }

    /// Jump to `fraction` of the track length, clamped to `0.0..=1.0`.
    pub fn seek(&mut self, fraction: f64) {
        if !self.source_loaded {
            return;
        }
        let Some(duration) = self.transport.duration() else {
            return;
        };

        let position = duration.mul_f64(clamp_unit(fraction));
        self.transport.seek_to(position);
        self.last_progress_secs = None;
        self.events.emit(PlaybackEvent::Seeked { position });
    }

    /// Scrub by `seconds` (negative goes back), staying inside the track.
    pub fn seek_relative(&mut self, seconds: i64) {
        let Some(duration) = self.transport.duration() else {
            return;
        };
        let total = duration.as_secs_f64();
        if total <= 0.0 {
            return;
        }

        let target = self.transport.position().as_secs_f64() + seconds as f64;
        self.seek(target / total);
    }

    /// Start a drag gesture on the seek bar.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Seek to the pointer while a drag is active. The pointer may be
    /// outside the bar; the fraction is clamped like any other seek.
    pub fn drag_to(&mut self, fraction: f64) {
        if self.dragging {
            self.seek(fraction);
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Set the output volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        self.volume = level;
        self.transport.set_volume(level);
        self.events.emit(PlaybackEvent::VolumeChanged { level });
    }

    /// Same as [`set_volume`](Self::set_volume) on a `0..=100` scale.
    pub fn set_volume_percent(&mut self, percent: f32) {
        self.set_volume(percent / 100.0);
    }

    /// Volume on a `0..=100` scale.
    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round() as u8
    }

    /// Poll the transport: finish the track if it ended, otherwise report
    /// progress whenever the whole-second position changes.
    pub fn tick(&mut self) {
        if !self.cursor.is_playing() {
            return;
        }

        if self.transport.is_finished() {
            self.handle_track_end();
            return;
        }

        let position = self.transport.position();
        let secs = position.as_secs();
        if self.last_progress_secs != Some(secs) {
            self.last_progress_secs = Some(secs);
            self.events.emit(PlaybackEvent::Progress {
                position,
                duration: self.transport.duration(),
            });
        }
    }
}

#[cfg(test)]
impl<T: Transport> PlaybackEngine<T> {
    /// Use a fixed seed for shuffle orders.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.current_index()
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing()
    }

    /// Current volume in `0.0..=1.0`.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn position(&self) -> Duration {
        self.transport.position()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
