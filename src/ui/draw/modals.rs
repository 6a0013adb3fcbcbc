//! Modal dialog rendering

use super::styling::{busy_label, HINT_FG, OVERLAY_BG};
use crate::table::sanitize;
use crate::types::DeleteFlow;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Center a `width` x `height` box inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render the delete confirmation modal; nothing while the flow is idle
pub fn render_delete_modal(frame: &mut Frame, flow: &DeleteFlow) {
    let Some(label) = flow.label() else {
        return;
    };
    let deleting = flow.is_deleting();

    let area = frame.area();
    let modal_width = (area.width as f32 * 0.5).min(60.0) as u16;
    let modal_area = centered_rect(area, modal_width, 8);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Delete Meter? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(OVERLAY_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Meter
            Constraint::Length(2), // Warning
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Actions
        ])
        .split(inner);

    let meter = Paragraph::new(Line::from(vec![
        Span::raw("Meter: "),
        Span::styled(
            sanitize(label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(meter, chunks[0]);

    let warning = Paragraph::new("This meter will be removed from the registry.")
        .style(Style::default().fg(HINT_FG))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(warning, chunks[1]);

    let actions_style = if deleting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    let actions = Paragraph::new(format!(
        "[Y] {}  |  [N] Cancel",
        busy_label(deleting, "Yes, delete it", "Deleting...")
    ))
    .style(actions_style)
    .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[3]);
}
