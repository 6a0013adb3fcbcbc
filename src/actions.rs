use crate::state::{AppState, SharedState};
use crate::types::{Meter, Severity, Tab};
use crossterm::event::KeyEvent;
use std::time::Instant;
use tracing::debug;

/// Represents all state-changing actions in the application
///
/// Input handling and background flows describe what happened as an action;
/// `apply_action` is the single place that mutates `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation
    SwitchTab(Tab),
    SelectNext,
    SelectPrev,

    // List panel
    SetLoading(bool),
    ReplaceMeters(Vec<Meter>),
    ShowEmptyState,
    SetRefreshing(bool),

    // Registration form
    FocusNextField,
    FocusPrevField,
    EditField(KeyEvent),
    PasteIntoField(String),
    SetSubmitting(bool),
    ResetForm,

    // Delete confirmation
    RequestDelete { id: String, label: String },
    CancelDelete,
    DeleteSucceeded,
    DeleteFailed,

    // Notifications
    Notify { message: String, severity: Severity },
    DismissLatestNotification,
}

impl AppAction {
    pub fn success(message: impl Into<String>) -> Self {
        AppAction::Notify {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        AppAction::Notify {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        AppAction::Notify {
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Apply an action to the application state
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::SwitchTab(tab) => {
            state.ui.active_tab = tab;
        }
        AppAction::SelectNext => {
            let last = state.data.meters.len().saturating_sub(1);
            if state.data.selected < last {
                state.data.selected += 1;
            }
        }
        AppAction::SelectPrev => {
            state.data.selected = state.data.selected.saturating_sub(1);
        }

        AppAction::SetLoading(loading) => {
            let visibility = &mut state.data.visibility;
            visibility.loading = loading;
            if loading {
                visibility.table = false;
                visibility.empty = false;
            }
        }
        AppAction::ReplaceMeters(meters) => {
            state.data.meters = meters;
            // Keep the highlight on a real row
            let last = state.data.meters.len().saturating_sub(1);
            state.data.selected = state.data.selected.min(last);

            let visibility = &mut state.data.visibility;
            let has_rows = !state.data.meters.is_empty();
            visibility.table = has_rows;
            visibility.empty = !has_rows;
        }
        AppAction::ShowEmptyState => {
            state.data.visibility.table = false;
            state.data.visibility.empty = true;
        }
        AppAction::SetRefreshing(refreshing) => {
            state.ui.refreshing = refreshing;
        }

        AppAction::FocusNextField => {
            state.form.focus = state.form.focus.next();
        }
        AppAction::FocusPrevField => {
            state.form.focus = state.form.focus.prev();
        }
        AppAction::EditField(key) => {
            state.form.focused_mut().handle_key_event(key);
        }
        AppAction::PasteIntoField(text) => {
            state.form.focused_mut().insert_str(&text);
        }
        AppAction::SetSubmitting(submitting) => {
            state.form.submitting = submitting;
        }
        AppAction::ResetForm => {
            state.form.reset();
        }

        AppAction::RequestDelete { id, label } => {
            if state.delete.request(id, label) {
                debug!(pending = ?state.delete.pending_id(), "Delete confirmation opened");
            }
        }
        AppAction::CancelDelete => {
            if state.delete.cancel() {
                debug!("Delete confirmation cancelled");
            }
        }
        AppAction::DeleteSucceeded => {
            state.delete.succeed();
        }
        AppAction::DeleteFailed => {
            state.delete.fail();
        }

        AppAction::Notify { message, severity } => {
            state.notifications.push(message, severity, Instant::now());
        }
        AppAction::DismissLatestNotification => {
            state.notifications.dismiss_latest(Instant::now());
        }
    }
}

/// Apply a single action under one write lock
///
/// A poisoned lock means a background task panicked mid-update; the action is
/// dropped rather than taking the UI down with it.
pub fn apply(state: &SharedState, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Apply several actions atomically
pub fn apply_many(state: &SharedState, actions: Vec<AppAction>) {
    if let Ok(mut s) = state.write() {
        for action in actions {
            apply_action(action, &mut s);
        }
    }
}
