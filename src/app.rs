//! Application module: the view model rendered by the terminal UI.
//!
//! The `App` model lives in `app::model`. It is fed by playback events and
//! never reaches into the engine's state directly.

mod model;

pub use model::*;
