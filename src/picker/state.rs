use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;

/// What the picker loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Continue,
    Confirm(Vec<PathBuf>),
    Cancel,
}

/// Selection state of the file picker: the candidate files, a cursor and
/// the set of ticked entries.
pub struct PickerState {
    root: PathBuf,
    entries: Vec<PathBuf>,
    cursor: usize,
    chosen: BTreeSet<usize>,
}

impl PickerState {
    pub fn new(root: PathBuf, entries: Vec<PathBuf>) -> Self {
        Self {
            root,
            entries,
            cursor: 0,
            chosen: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_chosen(&self, index: usize) -> bool {
        self.chosen.contains(&index)
    }

    pub fn chosen_count(&self) -> usize {
        self.chosen.len()
    }

    /// Entry label relative to the picker root.
    pub fn label(&self, index: usize) -> String {
        let path = &self.entries[index];
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> PickerOutcome {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return PickerOutcome::Cancel,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('g') | KeyCode::Home => self.cursor = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor = self.entries.len().saturating_sub(1);
            }
            KeyCode::Char(' ') => self.toggle(self.cursor),
            KeyCode::Char('a') => self.toggle_all(),
            KeyCode::Enter => return self.confirm(),
            _ => {}
        }
        PickerOutcome::Continue
    }

    fn move_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
    }

    fn move_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.entries.len() - 1
        } else {
            self.cursor - 1
        };
    }

    fn toggle(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        if !self.chosen.remove(&index) {
            self.chosen.insert(index);
        }
    }

    /// Tick every entry, or untick all when everything is already ticked.
    fn toggle_all(&mut self) {
        if self.chosen.len() == self.entries.len() {
            self.chosen.clear();
        } else {
            self.chosen = (0..self.entries.len()).collect();
        }
    }

    /// Ticked entries in list order, or the entry under the cursor when none are ticked.
    fn confirm(&self) -> PickerOutcome {
        if self.entries.is_empty() {
            return PickerOutcome::Cancel;
        }
        if self.chosen.is_empty() {
            return PickerOutcome::Confirm(vec![self.entries[self.cursor].clone()]);
        }
        PickerOutcome::Confirm(
            self.chosen
                .iter()
                .map(|&i| self.entries[i].clone())
                .collect(),
        )
    }
}
