//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: header with dashboard stats, tab bar, footer
//! - `panels`: the register form and the meter table
//! - `modals`: delete confirmation
//! - `toasts`: notification stack
//! - `styling`: colors and shared styles

mod components;
mod modals;
mod panels;
mod styling;
mod toasts;

pub use components::{render_footer, render_header, render_tab_bar};
pub use modals::render_delete_modal;
pub use panels::{render_meters_panel, render_register_panel};
pub use toasts::render_notifications;

use crate::state::AppState;
use crate::types::Tab;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Draw one full frame of the application
pub fn render_app(frame: &mut Frame, state: &AppState, base_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], base_url, state);
    render_tab_bar(frame, chunks[1], state.ui.active_tab);

    match state.ui.active_tab {
        Tab::Register => render_register_panel(frame, chunks[2], state),
        Tab::Meters => render_meters_panel(frame, chunks[2], state),
    }

    render_footer(frame, chunks[3], state);

    // Overlays last
    render_delete_modal(frame, &state.delete);
    render_notifications(frame, frame.area(), &state.notifications);
}
