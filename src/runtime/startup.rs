use std::env;
use std::path::PathBuf;

use crate::config;
use crate::console::Console;
use crate::engine::{LoopMode, MediaEngine};
use crate::player::Controller;
use crate::playlist::PlaylistStore;

pub fn loop_mode_from_setting(setting: config::LoopModeSetting) -> LoopMode {
    match setting {
        config::LoopModeSetting::NoLoop => LoopMode::NoLoop,
        config::LoopModeSetting::LoopAll => LoopMode::LoopAll,
        config::LoopModeSetting::LoopOne => LoopMode::LoopOne,
    }
}

/// Directory the file picker opens in: the command-line argument, then
/// `picker.root`, then the working directory.
pub fn picker_root(arg: Option<String>, picker: &config::PickerSettings) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| picker.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Wire the store, console and `engine` together and load the saved playlist.
pub fn build_controller<E: MediaEngine>(settings: &config::Settings, engine: E) -> Controller<E> {
    let store = PlaylistStore::new(settings.playlist.file.clone());
    let console = Console::new(settings.ui.console_lines);
    let mut controller = Controller::new(
        store,
        engine,
        console,
        loop_mode_from_setting(settings.playback.loop_mode),
    );

    controller.console_mut().log("SYSTEM INITIALIZED");
    controller.console_mut().log("TYPE 'add' TO LOAD MUSIC");
    controller.load_playlist();
    controller
}
