//! Application model types: `App` and `InputMode`.

/// Which keymap is active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the command line.
    Command,
}

/// View state that is not owned by the controller.
#[derive(Debug, Default)]
pub struct App {
    /// Cursor position in the playlist view.
    pub selected: usize,
    pub mode: InputMode,
    pub command_input: String,
    /// First `g` of `gg` seen.
    pub pending_gg: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn top(&mut self) {
        self.selected = 0;
    }

    pub fn bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep the cursor inside a playlist of `len` tracks.
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = InputMode::Command;
        self.command_input.clear();
        self.pending_gg = false;
    }

    pub fn exit_command_mode(&mut self) {
        self.mode = InputMode::Normal;
        self.command_input.clear();
    }

    pub fn push_command_char(&mut self, c: char) {
        self.command_input.push(c);
    }

    pub fn pop_command_char(&mut self) {
        self.command_input.pop();
    }

    /// Leave command mode and hand back what was typed.
    pub fn take_command(&mut self) -> String {
        self.mode = InputMode::Normal;
        std::mem::take(&mut self.command_input)
    }
}
