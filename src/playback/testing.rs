//! A transport that records calls instead of making sound.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(PathBuf),
    Play,
    Pause,
    SeekTo(Duration),
    SetVolume(f32),
}

#[derive(Debug)]
pub(crate) struct RecordingTransport {
    pub calls: Vec<Call>,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub finished: bool,
    pub volume: f32,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            position: Duration::ZERO,
            duration: Some(Duration::from_secs(200)),
            finished: false,
            volume: 1.0,
        }
    }
}

impl RecordingTransport {
    pub fn last_load(&self) -> Option<&Path> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Load(p) => Some(p.as_path()),
            _ => None,
        })
    }
}

impl Transport for RecordingTransport {
    fn load(&mut self, source: &Path) {
        self.calls.push(Call::Load(source.to_path_buf()));
        self.position = Duration::ZERO;
        self.finished = false;
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        self.calls.push(Call::SeekTo(position));
        self.position = position;
        self.finished = false;
    }

    fn set_volume(&mut self, level: f32) {
        self.calls.push(Call::SetVolume(level));
        self.volume = level;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
