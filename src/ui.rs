//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, InputMode};
use crate::background::MatrixRain;
use crate::config::{ControlsSettings, UiSettings};
use crate::engine::MediaEngine;
use crate::player::{Controller, loop_mode_label};
use crate::theme;

const COMMAND_PLACEHOLDER: &str = "> Enter command (play, stop, next, prev, add, clear)";

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("s".to_string(), "stop".to_string());
    map.insert("h/l".to_string(), "prev/next".to_string());
    // H/L is filled dynamically from config.
    map.insert("a".to_string(), "add files".to_string());
    map.insert("r".to_string(), "loop mode".to_string());
    map.insert(":".to_string(), "command".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "s", "gg/G", "a", "r", ":", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Window `[start, end)` of `total` rows that fits `height` and keeps
/// `selected` near the middle, plus the selected row's offset inside it.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::style_border())
        .style(theme::style_panel())
        .title(title)
}

/// Render the entire UI into the provided `frame`.
pub fn draw<E: MediaEngine>(
    frame: &mut Frame,
    app: &App,
    controller: &Controller<E>,
    rain: Option<&MatrixRain>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let area = frame.area();
    match rain {
        Some(rain) => frame.render_widget(rain, area),
        None => frame.render_widget(Block::default().style(theme::style_text()), area),
    }

    let inner = area.inner(Margin {
        horizontal: 3,
        vertical: 1,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(1), // track label
            Constraint::Length(1), // time label
            Constraint::Length(1), // progress
            Constraint::Length(1), // buttons
            Constraint::Min(3),    // playlist
            Constraint::Length(3), // command line
            Constraint::Length(7), // console
            Constraint::Length(4), // controls
        ])
        .split(inner);

    for chunk in chunks.iter() {
        frame.render_widget(Clear, *chunk);
    }

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .style(theme::style_text().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::style_text())
                .style(theme::style_text()),
        );
    frame.render_widget(header, chunks[0]);

    frame.render_widget(
        Paragraph::new(controller.track_label()).style(theme::style_text()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(controller.time_label()).style(theme::style_text()),
        chunks[2],
    );

    let gauge = Gauge::default()
        .gauge_style(theme::style_text().bg(theme::C_GROOVE))
        .ratio(controller.progress())
        .label("");
    frame.render_widget(gauge, chunks[3]);

    draw_buttons(frame, controller, chunks[4]);
    draw_playlist(frame, app, controller, chunks[5]);
    draw_command_line(frame, app, chunks[6]);
    draw_console(frame, controller, chunks[7]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .style(theme::style_dim())
        .block(panel(" controls ").padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[8]);
}

fn draw_buttons<E: MediaEngine>(frame: &mut Frame, controller: &Controller<E>, area: Rect) {
    let button = theme::style_button();
    let gap = Span::styled(" ", theme::style_text());
    let mut spans = vec![
        Span::styled("[ << ]", button),
        gap.clone(),
        Span::styled(controller.play_button_label(), button),
        gap.clone(),
        Span::styled("[ ■ ]", button),
        gap.clone(),
        Span::styled("[ >> ]", button),
        Span::styled(
            format!("   LOOP: {}", loop_mode_label(controller.loop_mode())),
            theme::style_dim(),
        ),
    ];
    if !controller.engine_available() {
        spans.push(Span::styled("   NO AUDIO OUTPUT", theme::style_warn()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(theme::style_text()),
        area,
    );
}

fn draw_playlist<E: MediaEngine>(
    frame: &mut Frame,
    app: &App,
    controller: &Controller<E>,
    area: Rect,
) {
    let playlist = controller.playlist();
    let title = format!(" playlist ({}) ", playlist.len());
    let block = panel(&title);

    if playlist.is_empty() {
        let empty = Paragraph::new("No tracks. Press a or type 'add'.")
            .style(theme::style_dim())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Only build ListItems for the visible window.
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_in_window) = visible_window(playlist.len(), height, app.selected);
    let current = playlist.current();

    let items: Vec<ListItem> = playlist.tracks()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let i = start + offset;
            if current == Some(i) {
                ListItem::new(format!("* {}", track.name))
                    .style(theme::style_panel().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", track.name))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::style_selected())
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(selected_in_window));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_command_line(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.mode {
        InputMode::Command => (format!(":{}_", app.command_input), theme::style_panel()),
        InputMode::Normal => (COMMAND_PLACEHOLDER.to_string(), theme::style_dim()),
    };
    let par = Paragraph::new(text).style(style).block(panel(" command "));
    frame.render_widget(par, area);
}

fn draw_console<E: MediaEngine>(frame: &mut Frame, controller: &Controller<E>, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let console = controller.console();
    let skip = console.len().saturating_sub(height);
    let lines: Vec<Line> = console.lines().skip(skip).map(Line::from).collect();
    let par = Paragraph::new(lines)
        .style(theme::style_panel())
        .block(panel(" console "));
    frame.render_widget(par, area);
}
