//! Settings for the library scan, playback defaults, controls, UI and logging.
//!
//! Values come from an optional TOML file overlaid by `FOLDERPLAY__*`
//! environment variables; anything unset keeps its default.

mod load;
mod schema;

pub use load::*;
pub use schema::*;
