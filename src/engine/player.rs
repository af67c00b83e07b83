use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::MediaEngine;
use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EngineEvent, LoopMode};

/// `MediaEngine` backed by rodio on a dedicated audio thread.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    events: Receiver<EngineEvent>,
    join: Option<JoinHandle<()>>,
    closed_reported: bool,
}

impl RodioEngine {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let join = spawn_engine_thread(rx, event_tx);

        Self {
            tx,
            events: event_rx,
            join: Some(join),
            closed_reported: false,
        }
    }

    fn send(&self, cmd: EngineCmd) {
        if let Err(e) = self.tx.send(cmd) {
            // Only happens when the audio thread is gone (e.g. no output device).
            tracing::debug!(cmd = ?e.0, "audio thread not running");
        }
    }
}

impl MediaEngine for RodioEngine {
    fn set_sources(&mut self, sources: Vec<PathBuf>) {
        self.send(EngineCmd::SetSources(sources));
    }

    fn play_index(&mut self, index: usize) {
        self.send(EngineCmd::Play(index));
    }

    fn resume(&mut self) {
        self.send(EngineCmd::Resume);
    }

    fn pause(&mut self) {
        self.send(EngineCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(EngineCmd::Stop);
    }

    fn seek(&mut self, position: Duration) {
        self.send(EngineCmd::Seek(position));
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.send(EngineCmd::SetLoopMode(mode));
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let mut events: Vec<EngineEvent> = self.events.try_iter().collect();
        // The thread only finishes on its own when it could not open an output.
        let finished = self.join.as_ref().is_some_and(|h| h.is_finished());
        if finished && !self.closed_reported {
            self.closed_reported = true;
            events.extend(self.events.try_iter());
            events.push(EngineEvent::Closed);
        }
        events
    }

    fn shutdown(&mut self, fade_out: Duration) {
        self.send(EngineCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
