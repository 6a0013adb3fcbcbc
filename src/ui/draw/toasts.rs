//! Notification toasts, stacked in the top-right corner

use super::styling::{severity_color, OVERLAY_BG};
use crate::notifications::{Notification, Notifications};
use crate::table::sanitize;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 50;
const MAX_TEXT_LINES: u16 = 4;

/// Render every live notification, oldest on top
pub fn render_notifications(frame: &mut Frame, area: Rect, notifications: &Notifications) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.right().saturating_sub(width);
    let mut y = area.y;

    for notification in notifications.iter() {
        let height = toast_height(&notification.message, width);
        if y + height > area.bottom() {
            break;
        }
        render_toast(frame, Rect::new(x, y, width, height), notification);
        y += height;
    }
}

fn toast_height(message: &str, width: u16) -> u16 {
    let text_width = width.saturating_sub(2).max(1) as usize;
    let chars = message.chars().count().max(1);
    let lines = chars.div_ceil(text_width) as u16;
    lines.clamp(1, MAX_TEXT_LINES) + 2
}

fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification) {
    let color = if notification.is_exiting() {
        Color::DarkGray
    } else {
        severity_color(notification.severity)
    };

    let mut style = Style::default().bg(OVERLAY_BG).fg(color);
    if notification.is_exiting() {
        style = style.add_modifier(Modifier::DIM);
    }

    frame.render_widget(Clear, area);

    let toast = Paragraph::new(sanitize(&notification.message))
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(toast, area);
}
