//! Audio output over `rodio`.
//!
//! [`RodioTransport`] implements the playback [`Transport`](crate::playback::Transport)
//! on the default output device.

mod clock;
mod sink;
mod transport;

pub use transport::RodioTransport;
