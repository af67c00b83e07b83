//! Falling-glyph rain drawn behind the player panels.
//!
//! The animation only depends on its own timer; it never looks at playback.

mod rain;

pub use rain::*;
