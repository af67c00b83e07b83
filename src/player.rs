//! Playback controller: the play/pause/stop/next/previous state machine
//! wrapped around one `MediaEngine` and the playlist store.

mod controller;

pub use controller::*;

#[cfg(test)]
mod tests;
