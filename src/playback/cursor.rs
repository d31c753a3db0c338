/// What happens when a track finishes on its own.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance while more than one track exists, otherwise stop.
    #[default]
    None,
    /// Replay the current track.
    One,
    /// Advance, wrapping at the end.
    All,
}

impl RepeatMode {
    /// The next mode in the cycle `None -> One -> All -> None`.
    pub fn next(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::None => "Off",
            RepeatMode::One => "Repeat-one",
            RepeatMode::All => "Repeat-all",
        }
    }
}

/// A permutation of playlist indices and where in it playback is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleState {
    order: Vec<usize>,
    position: usize,
}

#[cfg(test)]
impl ShuffleState {
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Mutable playback position and modes.
///
/// Shuffle state only exists while shuffle is on, so "shuffle enabled" and
/// "has a shuffle order" cannot disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    current_index: Option<usize>,
    is_playing: bool,
    shuffle: Option<ShuffleState>,
    repeat_mode: RepeatMode,
}

impl PlaybackCursor {
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle.is_some()
    }

    #[cfg(test)]
    pub fn shuffle(&self) -> Option<&ShuffleState> {
        self.shuffle.as_ref()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub(super) fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub(super) fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Point at the first track of a playlist of `len` tracks, or nowhere.
    pub(super) fn reset(&mut self, len: usize) {
        self.current_index = (len > 0).then_some(0);
        self.is_playing = false;
    }

    /// Move to `index` and keep the shuffle position pointing at it.
    pub(super) fn select(&mut self, index: usize) {
        self.current_index = Some(index);
        self.sync_shuffle_position();
    }

    /// Turn shuffle on with `order`, starting at the current track's position in it.
    pub(super) fn enable_shuffle(&mut self, order: Vec<usize>) {
        self.shuffle = Some(ShuffleState { order, position: 0 });
        self.sync_shuffle_position();
    }

    pub(super) fn disable_shuffle(&mut self) {
        self.shuffle = None;
    }

    fn sync_shuffle_position(&mut self) {
        let current = self.current_index;
        if let Some(s) = self.shuffle.as_mut() {
            if let Some(pos) = s.order.iter().position(|&i| Some(i) == current) {
                s.position = pos;
            }
        }
    }

    /// Step one track forward or back, wrapping at both ends.
    ///
    /// Sequential order steps `current_index`; shuffled order steps the
    /// position within the permutation. Returns the new index, or `None` for
    /// an empty playlist.
    pub(super) fn step(&mut self, len: usize, forward: bool) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = match self.shuffle.as_mut() {
            Some(s) if !s.order.is_empty() => {
                let n = s.order.len();
                s.position = if forward {
                    (s.position + 1) % n
                } else {
                    (s.position + n - 1) % n
                };
                s.order[s.position]
            }
            _ => {
                let cur = self.current_index.unwrap_or(0);
                if forward {
                    (cur + 1) % len
                } else {
                    (cur + len - 1) % len
                }
            }
        };

        self.current_index = Some(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_cycles_none_one_all() {
        let mut mode = RepeatMode::default();
        assert_eq!(mode, RepeatMode::None);
        mode = mode.next();
        assert_eq!(mode, RepeatMode::One);
        mode = mode.next();
        assert_eq!(mode, RepeatMode::All);
        mode = mode.next();
        assert_eq!(mode, RepeatMode::None);
    }

    #[test]
    fn sequential_step_wraps_both_ends() {
        let mut c = PlaybackCursor::default();
        c.reset(3);
        assert_eq!(c.step(3, false), Some(2));
        assert_eq!(c.step(3, true), Some(0));
        assert_eq!(c.step(3, true), Some(1));
        assert_eq!(c.step(3, true), Some(2));
        assert_eq!(c.step(3, true), Some(0));
    }

    #[test]
    fn step_on_empty_playlist_is_none() {
        let mut c = PlaybackCursor::default();
        c.reset(0);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.step(0, true), None);
        assert_eq!(c.current_index(), None);
    }

    #[test]
    fn shuffled_step_walks_the_permutation() {
        let mut c = PlaybackCursor::default();
        c.reset(4);
        c.select(1);
        c.enable_shuffle(vec![2, 1, 3, 0]);
        assert_eq!(c.shuffle().unwrap().position(), 1);

        assert_eq!(c.step(4, true), Some(3));
        assert_eq!(c.step(4, true), Some(0));
        assert_eq!(c.step(4, true), Some(2));
        assert_eq!(c.step(4, false), Some(0));
        let s = c.shuffle().unwrap();
        assert_eq!(s.order()[s.position()], c.current_index().unwrap());
    }

    #[test]
    fn select_keeps_shuffle_position_in_sync() {
        let mut c = PlaybackCursor::default();
        c.reset(3);
        c.enable_shuffle(vec![2, 0, 1]);
        c.select(1);
        let s = c.shuffle().unwrap();
        assert_eq!(s.position(), 2);
        assert_eq!(s.order()[s.position()], 1);
    }

    #[test]
    fn disabling_shuffle_continues_sequentially_from_current() {
        let mut c = PlaybackCursor::default();
        c.reset(5);
        c.enable_shuffle(vec![4, 2, 0, 3, 1]);
        c.step(5, true);
        assert_eq!(c.current_index(), Some(3));
        c.disable_shuffle();
        assert!(!c.shuffle_enabled());
        assert_eq!(c.step(5, true), Some(4));
    }
}
