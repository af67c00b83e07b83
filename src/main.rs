mod app;
mod background;
mod command;
mod config;
mod console;
mod engine;
mod picker;
mod player;
mod playlist;
mod runtime;
mod theme;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
