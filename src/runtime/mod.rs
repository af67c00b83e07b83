use std::env;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::background::MatrixRain;
use crate::engine::RodioEngine;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_warning) = settings::load_settings();

    match settings.log_path() {
        Some(path) => {
            if let Err(e) = logging::init_logging(&path, &settings.log) {
                eprintln!("matrix-player: logging disabled: {e}");
            }
        }
        None => eprintln!("matrix-player: no log location (HOME unset), logging disabled"),
    }
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }
    info!("starting");

    let picker_root = startup::picker_root(env::args().nth(1), &settings.picker);
    let mut controller = startup::build_controller(&settings, RodioEngine::new());
    let mut app = App::new();
    let mut rain = settings
        .background
        .enabled
        .then(|| MatrixRain::new(&settings.background));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut controller,
            &mut rain,
            &picker_root,
        )
    })();

    controller.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));

    restore_terminal(&mut terminal)?;

    if let Err(ref e) = run_result {
        warn!(error = %e, "event loop failed");
    }
    info!("stopped");
    run_result
}

/// Leave raw mode and the alternate screen and show the cursor. Every step
/// runs even when an earlier one fails; the first error is returned.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    first_error([raw, screen, cursor])
}

fn first_error<E>(results: impl IntoIterator<Item = Result<(), E>>) -> Result<(), E> {
    results.into_iter().collect()
}
