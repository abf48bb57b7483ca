//! Shared styles for both screens.

use ratatui::style::{Color, Modifier, Style};

pub const PRIMARY: Color = Color::Cyan;
pub const ACCENT: Color = Color::Green;
pub const MUTED: Color = Color::DarkGray;
pub const DANGER: Color = Color::Red;

pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn focused_border() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn blurred_border() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn error() -> Style {
    Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
}

pub fn price() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
