//! Playback sequencing: the cursor, shuffle order, repeat policy and the
//! seam to the audio output.
//!
//! [`PlaybackEngine`] owns all mutable playback state. Everything outside it
//! reads that state through getters or by subscribing to [`PlaybackEvent`]s.

mod cursor;
mod engine;
mod events;
mod shuffle;
mod transport;

pub use cursor::*;
pub use engine::*;
pub use events::*;
pub use shuffle::*;
pub use transport::*;

#[cfg(test)]
pub(crate) mod testing;
