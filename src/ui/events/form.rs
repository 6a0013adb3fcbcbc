//! Register tab: field focus, editing and submit

use super::helpers::InputContext;
use crate::actions::{apply, AppAction};
use crate::state::SharedState;
use crate::types::Effect;
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_form_key(key: KeyEvent, ctx: &InputContext, state: &SharedState) -> Option<Effect> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            apply(state, AppAction::FocusNextField);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            apply(state, AppAction::FocusPrevField);
            None
        }
        // Submit is disabled while a create is in flight
        KeyCode::Enter => (!ctx.submitting).then_some(Effect::Submit),
        KeyCode::Esc => None,
        _ => {
            apply(state, AppAction::EditField(key));
            None
        }
    }
}

pub fn handle_form_paste(text: &str, state: &SharedState) {
    apply(state, AppAction::PasteIntoField(text.to_string()));
}
