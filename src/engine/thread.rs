use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::probe::probe_duration;
use super::queue::auto_advance;
use super::sink::create_sink_at;
use super::types::{EngineCmd, EngineError, EngineEvent, LoopMode, PlaybackState};

const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let err = EngineError::NoOutput(e.to_string());
                warn!(error = %err, "audio thread exiting");
                let _ = events.send(EngineEvent::Error(err.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would scribble over the TUI.
        stream.log_on_drop(false);

        let mut worker = Worker {
            stream,
            events,
            sources: Vec::new(),
            index: None,
            sink: None,
            paused: true,
            loop_mode: LoopMode::default(),
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(EngineCmd::Quit { fade_out_ms }) => {
                    worker.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => worker.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio thread stopped");
    })
}

struct Worker {
    stream: OutputStream,
    events: Sender<EngineEvent>,
    sources: Vec<PathBuf>,
    index: Option<usize>,
    sink: Option<Sink>,
    paused: bool,
    loop_mode: LoopMode,
}

impl Worker {
    fn emit(&self, event: EngineEvent) {
        // The receiving side only goes away at shutdown.
        let _ = self.events.send(event);
    }

    fn handle(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::SetSources(sources) => self.set_sources(sources),
            EngineCmd::Play(i) => self.play(i),
            EngineCmd::Resume => self.resume(),
            EngineCmd::Pause => self.pause(),
            EngineCmd::Stop => self.stop(),
            EngineCmd::Seek(pos) => self.seek(pos),
            EngineCmd::SetLoopMode(m) => self.loop_mode = m,
            EngineCmd::Quit { fade_out_ms } => self.quit(fade_out_ms),
        }
    }

    fn set_sources(&mut self, sources: Vec<PathBuf>) {
        self.sources = sources;
        let stale = self.index.is_some_and(|i| i >= self.sources.len());
        if stale {
            self.stop();
            self.index = None;
            self.emit(EngineEvent::CurrentTrackChanged(None));
            self.emit(EngineEvent::DurationChanged(None));
        }
    }

    fn play(&mut self, i: usize) {
        let Some(path) = self.sources.get(i).cloned() else {
            warn!(index = i, len = self.sources.len(), "play index out of range");
            return;
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.index = Some(i);

        let events = match create_sink_at(&self.stream, &path, Duration::ZERO) {
            Ok(sink) => {
                sink.play();
                self.sink = Some(sink);
                self.paused = false;
                started_events(i, probe_duration(&path))
            }
            Err(e) => {
                warn!(error = %e, "cannot play source");
                self.paused = true;
                failed_events(&e)
            }
        };
        for event in events {
            self.emit(event);
        }
    }

    fn resume(&mut self) {
        let Some(ref s) = self.sink else {
            // Nothing loaded (e.g. after a stop): restart the current track.
            if let Some(i) = self.index {
                self.play(i);
            }
            return;
        };
        if self.paused {
            s.play();
            self.paused = false;
            self.emit(EngineEvent::StateChanged(PlaybackState::Playing));
        }
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            if !self.paused {
                s.pause();
                self.paused = true;
                self.emit(EngineEvent::StateChanged(PlaybackState::Paused));
            }
        }
    }

    /// Stop the sink but keep the current index, so `resume` restarts the same track.
    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.paused = true;
        self.emit(EngineEvent::PositionChanged(Duration::ZERO));
        self.emit(EngineEvent::StateChanged(PlaybackState::Stopped));
    }

    fn seek(&mut self, pos: Duration) {
        let Some(i) = self.index else {
            return;
        };
        let Some(ref s) = self.sink else {
            return;
        };

        if let Err(e) = s.try_seek(pos) {
            // Some decoders cannot seek; rebuild the sink and skip into the file instead.
            debug!(error = %e, "try_seek failed, rebuilding sink");
            let path = self.sources[i].clone();
            match create_sink_at(&self.stream, &path, pos) {
                Ok(new_sink) => {
                    s.stop();
                    if !self.paused {
                        new_sink.play();
                    }
                    self.sink = Some(new_sink);
                }
                Err(e) => {
                    self.emit(EngineEvent::Error(e.to_string()));
                    return;
                }
            }
        }
        self.emit(EngineEvent::PositionChanged(pos));
    }

    /// Periodic work: publish the position and auto-advance at end of track.
    fn tick(&mut self) {
        let Some(ref s) = self.sink else {
            return;
        };
        if self.paused {
            return;
        }

        if !s.empty() {
            let pos = s.get_pos();
            self.emit(EngineEvent::PositionChanged(pos));
            return;
        }

        match auto_advance(self.index, self.sources.len(), self.loop_mode) {
            Some(next) => self.play(next),
            None => self.stop(),
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.take() {
            // Fade out gently before stopping.
            fade_out_sink(&s, fade_out_ms);
            s.stop();
        }
        self.paused = true;
        self.emit(EngineEvent::StateChanged(PlaybackState::Stopped));
    }
}

/// Events for a source that started playing. The track change is only
/// announced once the sink exists.
pub(super) fn started_events(index: usize, duration: Option<Duration>) -> Vec<EngineEvent> {
    vec![
        EngineEvent::CurrentTrackChanged(Some(index)),
        EngineEvent::DurationChanged(duration),
        EngineEvent::PositionChanged(Duration::ZERO),
        EngineEvent::StateChanged(PlaybackState::Playing),
    ]
}

/// Events for a source that could not be opened or decoded.
pub(super) fn failed_events(err: &EngineError) -> Vec<EngineEvent> {
    vec![
        EngineEvent::Error(err.to_string()),
        EngineEvent::StateChanged(PlaybackState::Stopped),
    ]
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
