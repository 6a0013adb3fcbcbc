//! Styling utilities and color schemes

use crate::types::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Background shared by modals and notifications
pub const OVERLAY_BG: Color = Color::Rgb(30, 30, 30);

/// Muted text for hints and help lines
pub const HINT_FG: Color = Color::Rgb(150, 150, 150);

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

pub fn focused_border() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Label for a button that is disabled while its request runs
pub fn busy_label<'a>(busy: bool, idle: &'a str, busy_text: &'a str) -> &'a str {
    if busy {
        busy_text
    } else {
        idle
    }
}
