use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
};
use tracing::warn;

use super::FileSelector;
use super::scan::scan_audio_files;
use super::state::{PickerOutcome, PickerState};
use crate::config::PickerSettings;
use crate::theme;

const HELP: &str = "[j/k] move | [space] tick | [a] tick all | [enter] add | [esc] cancel";

/// Modal file picker drawn over the player. It takes over the terminal until
/// the user confirms or cancels.
pub struct TerminalPicker<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    root: PathBuf,
    settings: &'a PickerSettings,
}

impl<'a> TerminalPicker<'a> {
    pub fn new(
        terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
        root: PathBuf,
        settings: &'a PickerSettings,
    ) -> Self {
        Self {
            terminal,
            root,
            settings,
        }
    }

    fn run(&mut self) -> std::io::Result<Vec<PathBuf>> {
        let entries = scan_audio_files(&self.root, self.settings);
        let mut state = PickerState::new(self.root.clone(), entries);

        loop {
            self.terminal.draw(|f| draw(f, &state))?;

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match state.handle_key(key.code) {
                    PickerOutcome::Continue => {}
                    PickerOutcome::Confirm(files) => return Ok(files),
                    PickerOutcome::Cancel => return Ok(Vec::new()),
                }
            }
        }
    }
}

impl FileSelector for TerminalPicker<'_> {
    fn select_files(&mut self) -> Vec<PathBuf> {
        match self.run() {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "file picker failed");
                Vec::new()
            }
        }
    }
}

fn draw(frame: &mut Frame, state: &PickerState) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let title = format!(
        " add files: {} ({} ticked) ",
        state.root().display(),
        state.chosen_count()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::style_border())
        .style(theme::style_panel())
        .title(title)
        .title_alignment(Alignment::Center);

    if state.entries().is_empty() {
        let empty = Paragraph::new("No audio files found. Press esc to go back.")
            .style(theme::style_dim())
            .block(block);
        frame.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = (0..state.entries().len())
            .map(|i| {
                let mark = if state.is_chosen(i) { "[x] " } else { "[ ] " };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, theme::style_dim()),
                    Span::raw(state.label(i)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::style_selected())
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(state.cursor()));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    let help = Paragraph::new(HELP).style(theme::style_dim()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::style_border())
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(help, chunks[1]);
}
