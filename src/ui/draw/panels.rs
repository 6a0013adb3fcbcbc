//! Main panel rendering
//!
//! One panel per tab:
//! - Register panel: the four form inputs and the submit button
//! - Meters panel: loading indicator, table or empty placeholder

use super::styling::{self, busy_label, HINT_FG};
use crate::editor::FieldEditor;
use crate::state::AppState;
use crate::table::{project_rows, MeterRow, TimestampCell};
use crate::types::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const COLUMNS: [&str; 6] = [
    "Meter ID",
    "Gateway Key",
    "Gateway Token",
    "Parameter ID",
    "Last Inserted",
    "Actions",
];

/// Render the registration form
pub fn render_register_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Register Meter ")
        .borders(Borders::ALL)
        .border_style(styling::focused_border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Meter ID
            Constraint::Length(3), // Gateway Key
            Constraint::Length(3), // Gateway Token
            Constraint::Length(3), // Parameter ID
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Submit
            Constraint::Min(0),
        ])
        .split(inner);

    for (i, field) in FormField::all().into_iter().enumerate() {
        let focused = state.form.focus == field && !state.delete.is_modal_open();
        render_input(frame, chunks[i], field.label(), state.form.field(field), focused);
    }

    let submitting = state.form.submitting;
    let button_style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("[ {} ]", busy_label(submitting, "Register Meter", "Registering...")),
            button_style,
        ),
        Span::styled("  Enter to submit", Style::default().fg(HINT_FG)),
    ]));
    frame.render_widget(button, chunks[5]);
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, editor: &FieldEditor, focused: bool) {
    let border_style = if focused {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    let line = if focused {
        let (before, after) = editor.split_at_cursor();
        let mut rest = after.chars();
        let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(
                under_cursor,
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(rest.as_str().to_string()),
        ])
    } else {
        Line::from(editor.content().to_string())
    };

    let input = Paragraph::new(line)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(input, area);
}

/// Render the meter list with its loading and empty states
pub fn render_meters_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let refresh = busy_label(state.ui.refreshing, "[r] Refresh", "Refreshing...");
    let block = Block::default()
        .title(format!(" Meter List ({}) ", state.total_meters()))
        .title_bottom(Line::from(format!(" {refresh} ")).right_aligned())
        .borders(Borders::ALL)
        .border_style(styling::focused_border());

    let visibility = state.data.visibility;

    if visibility.loading {
        let loading = Paragraph::new("Loading meters...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
    } else if visibility.table {
        render_table(frame, area, block, state);
    } else if visibility.empty {
        let empty = Paragraph::new(
            "No meters registered yet\n\nPress [F1] to register one or [r] to refresh",
        )
        .style(Style::default().fg(HINT_FG))
        .block(block);
        frame.render_widget(empty, area);
    } else {
        frame.render_widget(block, area);
    }
}

fn render_table(frame: &mut Frame, area: Rect, block: Block, state: &AppState) {
    let header = Row::new(COLUMNS.to_vec())
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let pending = state.delete.pending_id();
    let rows: Vec<Row> = project_rows(&state.data.meters)
        .into_iter()
        .map(|row| meter_row(row, pending))
        .collect();

    let widths = [
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(12),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(state.data.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn meter_row(row: MeterRow, pending: Option<&str>) -> Row<'static> {
    let timestamp_style = match row.last_inserted {
        TimestampCell::Never => Style::default().fg(Color::DarkGray),
        TimestampCell::Invalid => Style::default().fg(Color::Red),
        TimestampCell::At(_) => Style::default(),
    };
    let action = if pending == Some(row.id.as_str()) {
        Cell::from("Pending").style(Style::default().fg(Color::Yellow))
    } else {
        Cell::from("[d] Delete").style(Style::default().fg(Color::Red))
    };

    Row::new(vec![
        Cell::from(row.meter_id),
        Cell::from(row.gateway_key),
        Cell::from(row.gateway_token),
        Cell::from(row.parameter_id),
        Cell::from(row.last_inserted.text().to_string()).style(timestamp_style),
        action,
    ])
}
