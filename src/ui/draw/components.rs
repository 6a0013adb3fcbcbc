//! Reusable UI components
//!
//! Header with the dashboard counters, the tab bar and the footer help line.

use super::styling::HINT_FG;
use crate::state::AppState;
use crate::types::Tab;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Render the application header with the backend URL and dashboard stats
pub fn render_header(frame: &mut Frame, area: Rect, base_url: &str, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(
            "Meter Registry",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {base_url}"), Style::default().fg(HINT_FG)),
        Span::raw("  |  "),
        Span::raw("Total Meters: "),
        Span::styled(
            state.total_meters().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Active Meters: "),
        Span::styled(
            state.active_meters().to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the tab bar; exactly one tab is highlighted
pub fn render_tab_bar(frame: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|tab| Line::from(format!("[{}] {}", tab.shortcut(), tab.label())))
        .collect();

    let selected = Tab::all().iter().position(|t| *t == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the footer with key help for the active tab
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = if state.delete.is_modal_open() {
        "y/Enter:Confirm  n/Esc:Cancel  Ctrl+X:Dismiss  Ctrl+C:Quit"
    } else {
        match state.ui.active_tab {
            Tab::Register => {
                "Tab/Shift+Tab:Field  Enter:Register  F2:Meter List  Ctrl+X:Dismiss  Ctrl+C:Quit"
            }
            Tab::Meters => {
                "j/k:Select  d:Delete  r/F5:Refresh  F1:Register  Ctrl+X:Dismiss  q:Quit"
            }
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}
