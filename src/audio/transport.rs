use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError};
use tracing::error;

use crate::playback::Transport;

use super::clock::PlayClock;
use super::sink::create_sink_at;

/// [`Transport`] playing through the default output device.
///
/// Seeking rebuilds the sink and skips into the file. Files that fail to
/// open or decode are logged and leave the transport silent.
pub struct RodioTransport {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    duration: Option<Duration>,
    volume: f32,
    clock: PlayClock,
}

impl RodioTransport {
    pub fn open_default() -> Result<Self, StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            duration: None,
            volume: 1.0,
            clock: PlayClock::default(),
        })
    }

    /// Replace the sink with one starting at `start_at`, keeping play/pause state.
    fn rebuild_at(&mut self, start_at: Duration) {
        let Some(path) = self.source.as_deref() else {
            return;
        };
        let was_running = self.clock.running();

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match create_sink_at(&self.stream, path, start_at) {
            Ok((sink, duration)) => {
                sink.set_volume(self.volume);
                if was_running {
                    sink.play();
                }
                self.sink = Some(sink);
                if duration.is_some() {
                    self.duration = duration;
                }
            }
            Err(err) => {
                error!(error = %err, "cannot play track");
                self.duration = None;
            }
        }

        self.clock = PlayClock::at(start_at);
        if was_running {
            self.clock.resume(Instant::now());
        }
    }
}

impl Transport for RodioTransport {
    fn load(&mut self, source: &Path) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = Some(source.to_path_buf());
        self.duration = None;
        self.clock = PlayClock::default();
        self.rebuild_at(Duration::ZERO);
    }

    fn play(&mut self) {
        // A drained sink cannot restart; play the source again from the top.
        if self.sink.as_ref().is_none_or(Sink::empty) {
            self.clock = PlayClock::default();
            self.rebuild_at(Duration::ZERO);
        }
        if let Some(sink) = &self.sink {
            sink.play();
            self.clock.resume(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.clock.pause(Instant::now());
    }

    fn seek_to(&mut self, position: Duration) {
        self.rebuild_at(position);
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(sink) = &self.sink {
            sink.set_volume(level);
        }
    }

    fn position(&self) -> Duration {
        let elapsed = self.clock.elapsed(Instant::now());
        match self.duration {
            Some(total) => elapsed.min(total),
            None => elapsed,
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.clock.running() && self.sink.as_ref().is_some_and(Sink::empty)
    }
}
