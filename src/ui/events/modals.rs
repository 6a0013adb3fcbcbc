//! Delete confirmation modal handler

use super::helpers::InputContext;
use crate::actions::{apply, AppAction};
use crate::state::SharedState;
use crate::types::Effect;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

/// Handle a key while the confirmation is open; the modal swallows every key
pub fn handle_delete_confirmation(
    key: KeyEvent,
    ctx: &InputContext,
    state: &SharedState,
) -> Option<Effect> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            if ctx.deleting {
                debug!("Delete already in flight");
                None
            } else {
                Some(Effect::ConfirmDelete)
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::CancelDelete);
            None
        }
        _ => None,
    }
}
