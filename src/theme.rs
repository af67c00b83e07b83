//! Color palette for the green-on-black look.

use ratatui::style::{Color, Modifier, Style};

pub const C_BG: Color = Color::Rgb(0, 0, 0);
pub const C_TEXT: Color = Color::Rgb(0, 255, 0);
pub const C_DIM: Color = Color::Rgb(0, 170, 0);
pub const C_BUTTON_BG: Color = Color::Rgb(0, 34, 0);
pub const C_PANEL_BG: Color = Color::Rgb(0, 17, 0);
pub const C_SELECTION_BG: Color = Color::Rgb(0, 68, 0);
pub const C_GROOVE: Color = Color::Rgb(0, 34, 0);
pub const C_WARN: Color = Color::Rgb(200, 255, 0);

pub fn style_text() -> Style {
    Style::default().fg(C_TEXT).bg(C_BG)
}

pub fn style_dim() -> Style {
    Style::default().fg(C_DIM).bg(C_BG)
}

pub fn style_border() -> Style {
    Style::default().fg(C_DIM)
}

pub fn style_panel() -> Style {
    Style::default().fg(C_TEXT).bg(C_PANEL_BG)
}

pub fn style_selected() -> Style {
    Style::default()
        .fg(C_TEXT)
        .bg(C_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_warn() -> Style {
    Style::default()
        .fg(C_WARN)
        .bg(C_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_button() -> Style {
    Style::default()
        .fg(C_TEXT)
        .bg(C_BUTTON_BG)
        .add_modifier(Modifier::BOLD)
}

/// Green scaled by `opacity` in `0.0..=1.0`, used for the rain trails.
pub fn green_with_opacity(opacity: f32) -> Color {
    let o = opacity.clamp(0.0, 1.0);
    Color::Rgb(0, (255.0 * o).round() as u8, 0)
}
