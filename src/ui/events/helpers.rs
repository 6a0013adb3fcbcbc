//! Helper functions for event handling

use crate::state::SharedState;
use crate::types::Tab;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the key handlers need to know about the state, read under one lock
#[derive(Debug, Clone, PartialEq)]
pub struct InputContext {
    pub tab: Tab,
    pub modal_open: bool,
    pub deleting: bool,
    pub submitting: bool,
    pub refreshing: bool,
    /// Internal id and display label of the highlighted meter, only while
    /// the table is on screen
    pub selected: Option<(String, String)>,
}

/// Snapshot the state; `None` if the lock is poisoned
pub fn snapshot(state: &SharedState) -> Option<InputContext> {
    let s = state.read().ok()?;
    Some(InputContext {
        tab: s.ui.active_tab,
        modal_open: s.delete.is_modal_open(),
        deleting: s.delete.is_deleting(),
        submitting: s.form.submitting,
        refreshing: s.ui.refreshing,
        selected: s
            .data
            .visibility
            .table
            .then(|| s.selected_meter())
            .flatten()
            .map(|m| (m.id.clone(), m.meter_id.clone())),
    })
}

/// True for `Ctrl+<c>`
pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}
