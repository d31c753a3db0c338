//! Library scanning: tag extraction, cover matching and the playlist document.
//!
//! `scan` turns a directory of audio files plus a directory of cover images
//! into an ordered [`Playlist`]. The document helpers persist that playlist as
//! JSON, and [`PlaylistService`] bundles both for callers that just want the
//! current playlist.

mod covers;
mod document;
mod error;
mod model;
mod scan;
mod service;
mod store;

pub use covers::*;
pub use document::*;
pub use error::*;
pub use model::*;
pub use scan::*;
pub use service::*;
pub use store::*;

#[cfg(test)]
mod tests;
