//! Recording `MediaEngine` for controller and dispatcher tests.

use std::path::PathBuf;
use std::time::Duration;

use super::MediaEngine;
use super::types::{EngineEvent, LoopMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSources(usize),
    Play(usize),
    Resume,
    Pause,
    Stop,
    Seek(Duration),
    SetLoopMode(LoopMode),
    Shutdown,
}

/// Records every call and replays queued events.
#[derive(Default)]
pub struct FakeEngine {
    pub calls: Vec<Call>,
    pub pending: Vec<EngineEvent>,
}

impl MediaEngine for FakeEngine {
    fn set_sources(&mut self, sources: Vec<PathBuf>) {
        self.calls.push(Call::SetSources(sources.len()));
    }
    fn play_index(&mut self, index: usize) {
        self.calls.push(Call::Play(index));
    }
    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }
    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }
    fn seek(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
    }
    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.calls.push(Call::SetLoopMode(mode));
    }
    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }
    fn shutdown(&mut self, _fade_out: Duration) {
        self.calls.push(Call::Shutdown);
    }
}
