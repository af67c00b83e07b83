//! Command dispatcher for the in-app command line.
//!
//! Six literal commands are understood, matched case-insensitively after
//! trimming. Anything else leaves a single diagnostic on the console.

use std::str::FromStr;

use crate::engine::MediaEngine;
use crate::picker::FileSelector;
use crate::player::Controller;

pub const UNKNOWN_COMMAND: &str = "Unknown command. Try: play, stop, next, prev, add, clear";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle play/pause.
    Play,
    Stop,
    Next,
    Prev,
    /// Pick files and append them to the playlist.
    Add,
    Clear,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown command: {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "play" => Ok(Self::Play),
            "stop" => Ok(Self::Stop),
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "add" => Ok(Self::Add),
            "clear" => Ok(Self::Clear),
            _ => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}

impl Command {
    /// Run this command against `controller`. `Add` asks `selector` for files first.
    pub fn execute<E: MediaEngine>(
        self,
        controller: &mut Controller<E>,
        selector: &mut dyn FileSelector,
    ) {
        match self {
            Self::Play => controller.play_pause(),
            Self::Stop => controller.stop(),
            Self::Next => controller.next(),
            Self::Prev => controller.previous(),
            Self::Add => {
                let files = selector.select_files();
                controller.add_files(files);
            }
            Self::Clear => controller.clear(),
        }
    }
}

/// Parse and execute one line of user input.
///
/// Returns the command that ran, or `None` after logging the diagnostic.
pub fn dispatch<E: MediaEngine>(
    input: &str,
    controller: &mut Controller<E>,
    selector: &mut dyn FileSelector,
) -> Option<Command> {
    match input.parse::<Command>() {
        Ok(cmd) => {
            tracing::debug!(?cmd, "dispatching command");
            cmd.execute(controller, selector);
            Some(cmd)
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected command");
            controller.console_mut().warn(UNKNOWN_COMMAND);
            None
        }
    }
}
