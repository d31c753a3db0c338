use std::path::Path;
use std::time::Duration;

/// The audio output the engine drives.
///
/// Calls are fire-and-forget: the engine never waits for the output to be
/// ready and does not see decode errors. End-of-track is observed by polling
/// [`Transport::is_finished`] from [`PlaybackEngine::tick`](super::PlaybackEngine::tick).
pub trait Transport {
    /// Point the output at `source`, paused at the start.
    fn load(&mut self, source: &Path);

    fn play(&mut self);

    fn pause(&mut self);

    fn seek_to(&mut self, position: Duration);

    /// `level` is in `0.0..=1.0`.
    fn set_volume(&mut self, level: f32);

    fn position(&self) -> Duration;

    /// Length of the loaded source, when known.
    fn duration(&self) -> Option<Duration>;

    /// True once the loaded source has played to its end.
    fn is_finished(&self) -> bool;
}
