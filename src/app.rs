//! Application module: view state for the TUI.
//!
//! The `App` model lives in `app::model` and holds the playlist cursor,
//! the input mode and the command line buffer. Playback state belongs to
//! the controller.

mod model;

pub use model::*;
