//! Small types shared by the engine, the controller and the UI.

use std::path::PathBuf;
use std::time::Duration;

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop at the end of the playlist; next/prev clamp at the boundaries.
    NoLoop,
    /// Wrap around at both ends of the playlist.
    #[default]
    LoopAll,
    /// Repeat the current track when it ends.
    LoopOne,
}

#[derive(Debug)]
pub enum EngineCmd {
    /// Replace the playable sources.
    SetSources(Vec<PathBuf>),
    /// Start playing the source at the given index.
    Play(usize),
    Resume,
    Pause,
    /// Stop playback immediately.
    Stop,
    /// Seek to an absolute position in the current source.
    Seek(Duration),
    SetLoopMode(LoopMode),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PositionChanged(Duration),
    /// Total length of the current source, when it can be determined.
    DurationChanged(Option<Duration>),
    CurrentTrackChanged(Option<usize>),
    StateChanged(PlaybackState),
    /// A source could not be opened or decoded, or the output device failed.
    Error(String),
    /// The audio thread has exited; later commands are dropped.
    Closed,
}

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    NoOutput(String),
}
