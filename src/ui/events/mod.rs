//! Event handling system for meter-registry-tui
//!
//! This module processes user input and translates it into state-changing actions.
//! Keys are routed by context:
//! - Global: quit, dismiss the newest notification, tab shortcuts
//! - Delete confirmation: swallows every other key while open
//! - Register tab: field focus, editing, submit
//! - Meter list tab: selection, delete, refresh
//!
//! # Architecture
//!
//! Handlers apply `AppAction`s for local changes and return an `Effect` when
//! the backend must be called. The app runs effects as background tasks so the
//! draw loop never waits on the network.
//!
//! # Lock Management
//!
//! The state is read once per key into an `InputContext`; every write goes
//! through `actions::apply`, which takes and releases its own lock.

mod form;
mod helpers;
mod modals;
mod navigation;

use crate::actions::{apply, AppAction};
use crate::state::SharedState;
use crate::types::{Effect, Tab};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;
use tracing::trace;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait briefly for one terminal event and handle it
    pub fn handle_events(&mut self, state: &SharedState) -> Result<Option<Effect>> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, state)),
            Event::Paste(text) => {
                self.handle_paste(&text, state);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Route one key press; returns the backend work it requests, if any
    pub fn handle_key(&mut self, key: KeyEvent, state: &SharedState) -> Option<Effect> {
        trace!(?key, "Key pressed");

        if helpers::is_ctrl(&key, 'c') {
            self.should_quit = true;
            return None;
        }
        if helpers::is_ctrl(&key, 'x') {
            apply(state, AppAction::DismissLatestNotification);
            return None;
        }

        let ctx = helpers::snapshot(state)?;

        if ctx.modal_open {
            return modals::handle_delete_confirmation(key, &ctx, state);
        }

        match key.code {
            KeyCode::F(1) => return Some(Effect::SwitchTab(Tab::Register)),
            KeyCode::F(2) => return Some(Effect::SwitchTab(Tab::Meters)),
            _ => {}
        }

        match ctx.tab {
            Tab::Register => form::handle_form_key(key, &ctx, state),
            Tab::Meters => {
                let result = navigation::handle_list_key(key, &ctx, state);
                if result.quit {
                    self.should_quit = true;
                }
                result.effect
            }
        }
    }

    /// Bracketed paste goes to the focused form field
    pub fn handle_paste(&mut self, text: &str, state: &SharedState) {
        let Some(ctx) = helpers::snapshot(state) else {
            return;
        };
        if ctx.tab == Tab::Register && !ctx.modal_open {
            form::handle_form_paste(text, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::apply_action;
    use crate::test_support::{meter, shared_state};
    use crate::types::{DeleteFlow, FormField, Severity};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(handler: &mut EventHandler, state: &SharedState, text: &str) {
        for c in text.chars() {
            assert_eq!(handler.handle_key(press(KeyCode::Char(c)), state), None);
        }
    }

    fn list_state() -> SharedState {
        let state = shared_state();
        {
            let mut s = state.write().unwrap();
            apply_action(AppAction::SwitchTab(Tab::Meters), &mut s);
            apply_action(
                AppAction::ReplaceMeters(vec![meter("abc123", "M1"), meter("def456", "M2")]),
                &mut s,
            );
        }
        state
    }

    #[test]
    fn test_typing_fills_focused_field_and_tab_moves_focus() {
        let state = shared_state();
        let mut handler = EventHandler::new();

        type_text(&mut handler, &state, "M1q");
        handler.handle_key(press(KeyCode::Tab), &state);
        type_text(&mut handler, &state, "KEY12");
        handler.handle_key(press(KeyCode::BackTab), &state);
        handler.handle_key(press(KeyCode::Backspace), &state);

        let values = state.read().unwrap().form.values();
        assert_eq!(values.meter_id, "M1");
        assert_eq!(values.gateway_key, "KEY12");
        assert!(!handler.should_quit, "q is text on the register tab");
    }

    #[test]
    fn test_enter_submits_unless_busy() {
        let state = shared_state();
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(press(KeyCode::Enter), &state),
            Some(Effect::Submit)
        );

        state.write().unwrap().form.submitting = true;
        assert_eq!(handler.handle_key(press(KeyCode::Enter), &state), None);
    }

    #[test]
    fn test_function_keys_switch_tabs() {
        let state = shared_state();
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(press(KeyCode::F(2)), &state),
            Some(Effect::SwitchTab(Tab::Meters))
        );
        assert_eq!(
            handler.handle_key(press(KeyCode::F(1)), &state),
            Some(Effect::SwitchTab(Tab::Register))
        );
    }

    #[test]
    fn test_list_navigation_and_delete_request() {
        let state = list_state();
        let mut handler = EventHandler::new();

        handler.handle_key(press(KeyCode::Char('j')), &state);
        handler.handle_key(press(KeyCode::Char('d')), &state);

        let s = state.read().unwrap();
        assert_eq!(
            s.delete,
            DeleteFlow::Confirming {
                id: "def456".to_string(),
                label: "M2".to_string()
            }
        );
    }

    #[test]
    fn test_delete_with_empty_list_warns() {
        let state = shared_state();
        apply(&state, AppAction::SwitchTab(Tab::Meters));
        let mut handler = EventHandler::new();

        handler.handle_key(press(KeyCode::Char('d')), &state);

        let s = state.read().unwrap();
        assert_eq!(s.delete, DeleteFlow::Idle);
        let notes: Vec<_> = s
            .notifications
            .iter()
            .map(|n| (n.message.as_str(), n.severity))
            .collect();
        assert_eq!(notes, vec![(navigation::NO_SELECTION_MESSAGE, Severity::Warning)]);
    }

    #[test]
    fn test_delete_ignores_cached_rows_while_table_hidden() {
        for hide in [AppAction::ShowEmptyState, AppAction::SetLoading(true)] {
            let state = list_state();
            apply(&state, hide);
            let mut handler = EventHandler::new();

            handler.handle_key(press(KeyCode::Char('d')), &state);

            let s = state.read().unwrap();
            assert_eq!(s.delete, DeleteFlow::Idle);
            assert_eq!(s.data.meters.len(), 2, "cache is kept for the header counts");
            let messages: Vec<&str> = s.notifications.iter().map(|n| n.message.as_str()).collect();
            assert_eq!(messages, vec![navigation::NO_SELECTION_MESSAGE]);
        }
    }

    #[test]
    fn test_modal_confirm_and_cancel() {
        let state = list_state();
        let mut handler = EventHandler::new();
        handler.handle_key(press(KeyCode::Char('d')), &state);

        // Tab keys are swallowed by the modal
        assert_eq!(handler.handle_key(press(KeyCode::F(1)), &state), None);
        assert_eq!(
            handler.handle_key(press(KeyCode::Char('y')), &state),
            Some(Effect::ConfirmDelete)
        );

        handler.handle_key(press(KeyCode::Esc), &state);
        assert_eq!(state.read().unwrap().delete, DeleteFlow::Idle);
    }

    #[test]
    fn test_modal_locked_while_deleting() {
        let state = list_state();
        let mut handler = EventHandler::new();
        handler.handle_key(press(KeyCode::Char('d')), &state);
        state.write().unwrap().delete.begin();

        assert_eq!(handler.handle_key(press(KeyCode::Enter), &state), None);
        handler.handle_key(press(KeyCode::Char('n')), &state);
        assert!(state.read().unwrap().delete.is_deleting());
    }

    #[test]
    fn test_refresh_key_disabled_while_refreshing() {
        let state = list_state();
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(press(KeyCode::Char('r')), &state),
            Some(Effect::Refresh)
        );
        state.write().unwrap().ui.refreshing = true;
        assert_eq!(handler.handle_key(press(KeyCode::F(5)), &state), None);
    }

    #[test]
    fn test_quit_keys() {
        let state = list_state();
        let mut handler = EventHandler::new();
        handler.handle_key(press(KeyCode::Char('q')), &state);
        assert!(handler.should_quit);

        let state = shared_state();
        let mut handler = EventHandler::new();
        handler.handle_key(ctrl('c'), &state);
        assert!(handler.should_quit);
    }

    #[test]
    fn test_ctrl_x_dismisses_newest_notification() {
        let state = shared_state();
        apply(&state, AppAction::success("first"));
        apply(&state, AppAction::error("second"));
        let mut handler = EventHandler::new();

        handler.handle_key(ctrl('x'), &state);

        let s = state.read().unwrap();
        let exiting: Vec<bool> = s.notifications.iter().map(|n| n.is_exiting()).collect();
        assert_eq!(exiting, vec![false, true]);
    }

    #[test]
    fn test_paste_only_reaches_register_form() {
        let state = shared_state();
        let mut handler = EventHandler::new();
        state.write().unwrap().form.focus = FormField::GatewayToken;

        handler.handle_paste("TOK12\n", &state);
        assert_eq!(state.read().unwrap().form.values().gateway_token, "TOK12");

        apply(&state, AppAction::SwitchTab(Tab::Meters));
        handler.handle_paste("ignored", &state);
        assert_eq!(state.read().unwrap().form.values().gateway_token, "TOK12");
    }
}
