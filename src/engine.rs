//! Media engine: the collaborator that decodes and plays audio.
//!
//! The controller only talks to the `MediaEngine` trait. `RodioEngine` is the
//! real implementation and runs its own audio thread; it reports back through
//! `EngineEvent`s that the UI loop drains with `poll_events`.

mod player;
mod probe;
mod queue;
mod sink;
mod thread;
mod types;

use std::path::PathBuf;
use std::time::Duration;

pub use player::RodioEngine;
pub use queue::{Direction, step};
pub use types::*;

/// Handle to something that can play an ordered list of sources.
pub trait MediaEngine {
    /// Replace the list of sources. Playback of a still valid index continues.
    fn set_sources(&mut self, sources: Vec<PathBuf>);
    /// Start playing the source at `index` from the beginning.
    fn play_index(&mut self, index: usize);
    /// Continue a paused source.
    fn resume(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Jump to `position` inside the current source.
    fn seek(&mut self, position: Duration);
    fn set_loop_mode(&mut self, mode: LoopMode);
    /// Take every event emitted since the last call.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
    /// Stop playback, fading out over `fade_out`, and release the output device.
    fn shutdown(&mut self, fade_out: Duration);
}

#[cfg(test)]
pub(crate) mod fake;
