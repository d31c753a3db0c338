//! State-change notifications emitted by the engine.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::cursor::RepeatMode;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A new playlist replaced the old one.
    PlaylistLoaded { len: usize },
    /// The cursor moved to another track.
    TrackChanged { index: usize },
    PlayStateChanged { playing: bool },
    ShuffleChanged { enabled: bool },
    RepeatModeChanged { mode: RepeatMode },
    Seeked { position: Duration },
    VolumeChanged { level: f32 },
    /// Periodic position report while playing.
    Progress {
        position: Duration,
        duration: Option<Duration>,
    },
    /// The last track ended and nothing follows it.
    Stopped,
}

/// Fan-out of events to any number of subscribers.
#[derive(Debug, Default)]
pub(super) struct EventBus {
    subscribers: Vec<Sender<PlaybackEvent>>,
}

impl EventBus {
    pub(super) fn subscribe(&mut self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send `event` to every live subscriber, dropping the ones that hung up.
    pub(super) fn emit(&mut self, event: PlaybackEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
