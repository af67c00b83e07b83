use std::path::PathBuf;
use std::time::Duration;

use crate::console::Console;
use crate::engine::{Direction, EngineEvent, LoopMode, MediaEngine, PlaybackState, step};
use crate::playlist::{Playlist, PlaylistError, PlaylistStore, display_name};

/// Drives one `MediaEngine` from the playlist and mirrors its events back
/// into label/slider state for the UI.
pub struct Controller<E: MediaEngine> {
    store: PlaylistStore,
    engine: E,
    state: PlaybackState,
    loop_mode: LoopMode,
    position: Duration,
    duration: Option<Duration>,
    now_playing: Option<String>,
    console: Console,
    /// Cleared once the engine reports it can no longer play anything.
    engine_available: bool,
}

impl<E: MediaEngine> Controller<E> {
    pub fn new(store: PlaylistStore, mut engine: E, console: Console, loop_mode: LoopMode) -> Self {
        engine.set_loop_mode(loop_mode);
        engine.set_sources(store.playlist().paths());
        Self {
            store,
            engine,
            state: PlaybackState::Stopped,
            loop_mode,
            position: Duration::ZERO,
            duration: None,
            now_playing: None,
            console,
            engine_available: true,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &Playlist {
        self.store.playlist()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Read the persisted playlist and report what happened on the console.
    pub fn load_playlist(&mut self) {
        match self.store.load() {
            Ok(report) => {
                if !report.missing.is_empty() {
                    let names: Vec<String> =
                        report.missing.iter().map(|p| display_name(p)).collect();
                    self.console.warn(format!("Missing files: {}", names.join(", ")));
                }
                if !self.store.playlist().is_empty() {
                    self.console
                        .log(format!("Loaded {} tracks", self.store.playlist().len()));
                }
            }
            Err(e) => self.console.warn(format!("Playlist load error: {e}")),
        }
        self.engine.set_sources(self.store.playlist().paths());
    }

    /// Pause when playing; otherwise start (or resume) from the current track.
    pub fn play_pause(&mut self) {
        if !self.check_engine() {
            return;
        }
        match self.state {
            PlaybackState::Playing => {
                self.engine.pause();
                self.state = PlaybackState::Paused;
                self.console.log("Playback paused");
            }
            PlaybackState::Paused => {
                self.engine.resume();
                self.state = PlaybackState::Playing;
                self.console.log("Playback started");
            }
            PlaybackState::Stopped => match self.store.playlist().current() {
                Some(i) => {
                    self.engine.play_index(i);
                    self.state = PlaybackState::Playing;
                    self.console.log("Playback started");
                }
                None => self.console.log("Playlist is empty"),
            },
        }
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
        self.console.log("Playback stopped");
    }

    pub fn next(&mut self) {
        if self.advance(Direction::Forward) {
            self.console.log("Next track");
        }
    }

    pub fn previous(&mut self) {
        if self.advance(Direction::Backward) {
            self.console.log("Previous track");
        }
    }

    fn advance(&mut self, direction: Direction) -> bool {
        if !self.check_engine() {
            return false;
        }
        let playlist = self.store.playlist();
        let before = playlist.current();
        let Some(i) = step(before, playlist.len(), direction, self.loop_mode) else {
            self.console.log("Playlist is empty");
            return false;
        };

        self.store.set_current(i);
        // A clamped step while playing keeps the running track going.
        if before != Some(i) || self.state != PlaybackState::Playing {
            self.engine.play_index(i);
            self.state = PlaybackState::Playing;
        }
        true
    }

    /// Jump to `position_ms` in the current track; the engine does any validation.
    /// Ignored while stopped, since nothing is loaded to seek in.
    pub fn seek(&mut self, position_ms: u64) {
        if self.state == PlaybackState::Stopped {
            return;
        }
        let pos = Duration::from_millis(position_ms);
        self.engine.seek(pos);
        self.position = pos;
    }

    /// Seek relative to the current position, saturating at the start.
    pub fn seek_by(&mut self, delta_ms: i64) {
        let cur = self.position.as_millis() as i64;
        self.seek(cur.saturating_add(delta_ms).max(0) as u64);
    }

    /// Make `index` current and start playing it.
    pub fn select_track(&mut self, index: usize) {
        if !self.check_engine() {
            return;
        }
        if !self.store.set_current(index) {
            self.console.warn(format!("No track at position {}", index + 1));
            return;
        }
        self.engine.play_index(index);
        self.state = PlaybackState::Playing;
        self.console.log("Playing selected track");
    }

    /// Append `paths` to the playlist and persist it. An empty selection is a no-op.
    pub fn add_files(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }

        let (report, saved) = self.store.add(&paths);
        for skipped in &report.skipped {
            self.console.warn(format!(
                "Skipped {}: {}",
                display_name(&skipped.path),
                skipped.reason
            ));
        }
        self.engine.set_sources(self.store.playlist().paths());
        self.report_save(saved);
        self.console.log(format!("Added {} file(s)", report.added));
    }

    /// Empty the playlist, stop playback and persist the empty list.
    pub fn clear(&mut self) {
        let saved = self.store.clear();
        self.engine.stop();
        self.engine.set_sources(Vec::new());
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
        self.duration = None;
        self.now_playing = None;
        self.report_save(saved);
        self.console.log("Playlist cleared");
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        self.engine.set_loop_mode(mode);
    }

    /// Cycle `loop_mode` through `NoLoop -> LoopAll -> LoopOne`.
    pub fn cycle_loop_mode(&mut self) {
        let next = match self.loop_mode {
            LoopMode::NoLoop => LoopMode::LoopAll,
            LoopMode::LoopAll => LoopMode::LoopOne,
            LoopMode::LoopOne => LoopMode::NoLoop,
        };
        self.set_loop_mode(next);
        self.console.log(format!("Loop mode: {}", loop_mode_label(next)));
    }

    /// Apply every event the engine emitted since the last call.
    pub fn drain_engine_events(&mut self) {
        for event in self.engine.poll_events() {
            self.handle_engine_event(event);
        }
    }

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PositionChanged(p) => self.position = p,
            EngineEvent::DurationChanged(d) => self.duration = d,
            EngineEvent::CurrentTrackChanged(Some(i)) => {
                if self.store.set_current(i) {
                    let name = self.store.playlist().tracks()[i].name.clone();
                    self.console.log(format!("Now playing: {name}"));
                    self.now_playing = Some(name);
                }
            }
            EngineEvent::CurrentTrackChanged(None) => {
                self.now_playing = None;
                self.duration = None;
            }
            EngineEvent::StateChanged(s) => {
                self.state = s;
                if s == PlaybackState::Stopped {
                    self.position = Duration::ZERO;
                }
            }
            EngineEvent::Error(msg) => self.console.warn(msg),
            EngineEvent::Closed => {
                self.engine_available = false;
                self.state = PlaybackState::Stopped;
                self.position = Duration::ZERO;
                self.now_playing = None;
            }
        }
    }

    /// Whether playback commands can still reach an audio output.
    pub fn engine_available(&self) -> bool {
        self.engine_available
    }

    fn check_engine(&mut self) -> bool {
        if !self.engine_available {
            self.console.warn("No audio output");
        }
        self.engine_available
    }

    /// Persist the playlist and release the engine.
    pub fn shutdown(&mut self, fade_out: Duration) {
        let saved = self.store.save();
        self.report_save(saved);
        self.engine.shutdown(fade_out);
    }

    fn report_save(&mut self, saved: Result<(), PlaylistError>) {
        match saved {
            Ok(()) => self.console.log("Playlist saved"),
            Err(e) => self.console.warn(format!("Playlist save error: {e}")),
        }
    }

    pub fn track_label(&self) -> String {
        match &self.now_playing {
            Some(name) => format!("> NOW PLAYING: {name}"),
            None => "> SYSTEM READY".to_string(),
        }
    }

    pub fn time_label(&self) -> String {
        let total = self.duration.map_or(0, |d| d.as_millis() as i64);
        format!(
            "> {} / {}",
            format_time(self.position.as_millis() as i64),
            format_time(total)
        )
    }

    pub fn play_button_label(&self) -> &'static str {
        if self.state == PlaybackState::Playing {
            "[ || ]"
        } else {
            "[ > ]"
        }
    }

    /// Fraction of the current track already played, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(total) if !total.is_zero() => {
                (self.position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

/// Format milliseconds as `m:ss`; negative values render as `0:00`.
pub fn format_time(milliseconds: i64) -> String {
    if milliseconds < 0 {
        return "0:00".to_string();
    }
    let seconds = milliseconds / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn loop_mode_label(mode: LoopMode) -> &'static str {
    match mode {
        LoopMode::NoLoop => "No-loop",
        LoopMode::LoopAll => "Loop-around",
        LoopMode::LoopOne => "Repeat-one",
    }
}
