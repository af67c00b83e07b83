use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "matrix-player";

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `MATRIX_PLAYER__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MATRIX_PLAYER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.ui.console_lines == 0 {
            return Err("ui.console_lines must be >= 1".to_string());
        }
        if self.background.columns == 0 {
            return Err("background.columns must be >= 1".to_string());
        }
        if self.background.tick_ms < 10 {
            return Err("background.tick_ms must be >= 10".to_string());
        }
        if self.picker.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("picker.extensions must name at least one extension".to_string());
        }
        Ok(())
    }

    /// Log file to write to: `log.file` if set, otherwise the XDG state default.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(default_log_path)
    }
}

/// Resolve the config path from `MATRIX_PLAYER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MATRIX_PLAYER_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/matrix-player/config.toml`
/// or `~/.config/matrix-player/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_STATE_HOME/matrix-player/matrix-player.log`, falling back to
/// `~/.local/state/matrix-player/matrix-player.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"])
        .map(|d| d.join(APP_DIR).join("matrix-player.log"))
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        return Some(PathBuf::from(xdg));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |acc, part| acc.join(part))
    })
}
