use std::io::Stdout;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::background::MatrixRain;
use crate::command::{self, Command};
use crate::config;
use crate::engine::MediaEngine;
use crate::picker::TerminalPicker;
use crate::player::Controller;
use crate::ui;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Main terminal event loop: drains engine events, animates the rain,
/// draws and handles input. Returns `Ok(())` when the user quits.
pub fn run<E: MediaEngine>(
    terminal: &mut Term,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<E>,
    rain: &mut Option<MatrixRain>,
    picker_root: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.background.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        controller.drain_engine_events();
        app.clamp_selection(controller.playlist().len());

        if let Some(rain) = rain.as_mut() {
            if last_tick.elapsed() >= tick {
                let size = terminal.size()?;
                rain.resize(size.width, size.height);
                rain.tick();
                last_tick = Instant::now();
            }
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                controller,
                rain.as_ref(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, terminal, settings, app, controller, picker_root) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<E: MediaEngine>(
    key: KeyEvent,
    terminal: &mut Term,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<E>,
    picker_root: &Path,
) -> bool {
    if app.mode == InputMode::Command {
        match key.code {
            KeyCode::Esc => app.exit_command_mode(),
            KeyCode::Backspace => app.pop_command_char(),
            KeyCode::Enter => {
                let input = app.take_command();
                let mut picker =
                    TerminalPicker::new(terminal, picker_root.to_path_buf(), &settings.picker);
                command::dispatch(&input, controller, &mut picker);
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_command_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    let len = controller.playlist().len();
    let scrub_ms = settings.controls.scrub_seconds.saturating_mul(1000).min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char('q') => {
            app.pending_gg = false;
            return true;
        }
        KeyCode::Char(':') => app.enter_command_mode(),
        KeyCode::Char('g') => {
            if app.pending_gg {
                app.pending_gg = false;
                app.top();
            } else {
                app.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.pending_gg = false;
            app.bottom(len);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.pending_gg = false;
            app.next(len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.pending_gg = false;
            app.prev(len);
        }
        KeyCode::Enter => {
            app.pending_gg = false;
            if len > 0 {
                controller.select_track(app.selected);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.pending_gg = false;
            controller.play_pause();
        }
        KeyCode::Char('s') => {
            app.pending_gg = false;
            controller.stop();
        }
        KeyCode::Char('l') => {
            app.pending_gg = false;
            controller.next();
            follow_current(app, controller);
        }
        KeyCode::Char('h') => {
            app.pending_gg = false;
            controller.previous();
            follow_current(app, controller);
        }
        KeyCode::Char('L') => {
            app.pending_gg = false;
            controller.seek_by(scrub_ms);
        }
        KeyCode::Char('H') => {
            app.pending_gg = false;
            controller.seek_by(-scrub_ms);
        }
        KeyCode::Char('r') => {
            app.pending_gg = false;
            controller.cycle_loop_mode();
        }
        KeyCode::Char('a') => {
            app.pending_gg = false;
            let mut picker =
                TerminalPicker::new(terminal, picker_root.to_path_buf(), &settings.picker);
            Command::Add.execute(controller, &mut picker);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            app.pending_gg = false;
        }
        _ => {}
    }

    false
}

/// Move the cursor onto the current track after next/prev.
fn follow_current<E: MediaEngine>(app: &mut App, controller: &Controller<E>) {
    if let Some(i) = controller.playlist().current() {
        app.selected = i;
    }
}
