//! File-selection collaborator: asks the user for audio files to add.
//!
//! `FileSelector` is the seam the `add` command goes through; the terminal
//! implementation lists audio files under a root directory and lets the user
//! tick several of them.

mod scan;
mod state;
mod terminal;

use std::path::PathBuf;

pub use terminal::TerminalPicker;

pub trait FileSelector {
    /// Return the chosen files, or nothing when the user cancelled.
    fn select_files(&mut self) -> Vec<PathBuf>;
}
