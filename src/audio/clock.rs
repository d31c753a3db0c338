use std::time::{Duration, Instant};

/// Elapsed playback time: what accumulated before the last pause plus the
/// time since the last resume.
#[derive(Debug, Clone, Default)]
pub(super) struct PlayClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlayClock {
    /// Paused at `position`.
    pub(super) fn at(position: Duration) -> Self {
        Self {
            started_at: None,
            accumulated: position,
        }
    }

    pub(super) fn running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(super) fn pause(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    pub(super) fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }
}
