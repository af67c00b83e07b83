use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/matrix-player/config.toml` or
/// `~/.config/matrix-player/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MATRIX_PLAYER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub playlist: PlaylistSettings,
    pub picker: PickerSettings,
    pub background: BackgroundSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title shown in the header box.
    pub header_text: String,
    /// How many console lines are kept in the scrollback.
    pub console_lines: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " MATRIX AUDIO PLAYER ".to_string(),
            console_lines: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Boundary policy for next/prev and end-of-track behavior.
    pub loop_mode: LoopModeSetting,
}

#[derive(Debug, Copy, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "no_loop", alias = "no-loop", alias = "clamp")]
    NoLoop,
    #[default]
    #[serde(
        alias = "loopall",
        alias = "loop_all",
        alias = "loop-all",
        alias = "loop-around",
        alias = "wrap"
    )]
    LoopAll,
    #[serde(
        alias = "loopone",
        alias = "loop_one",
        alias = "loop-one",
        alias = "repeat-one"
    )]
    LoopOne,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// JSON file the playlist is persisted to. Relative paths resolve against
    /// the working directory.
    pub file: PathBuf,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("matrix_playlist.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    /// Directory the file picker lists. Defaults to the working directory.
    pub root: Option<PathBuf>,
    /// File extensions offered by the picker (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: vec!["mp3".into(), "wav".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    /// Draw the falling-glyph rain behind the panels.
    pub enabled: bool,
    /// Maximum number of rain columns; fewer are used on narrow terminals.
    pub columns: usize,
    /// Animation tick in milliseconds.
    pub tick_ms: u64,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            columns: 100,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path. Defaults to `$XDG_STATE_HOME/matrix-player/matrix-player.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
