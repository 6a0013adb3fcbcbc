//! Meter list tab: selection, delete requests and refresh

use super::helpers::InputContext;
use crate::actions::{apply, AppAction};
use crate::state::SharedState;
use crate::types::{Effect, Tab};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

pub const NO_SELECTION_MESSAGE: &str = "No meter selected";

/// Outcome of a list key; `quit` is set by `q`
#[derive(Debug, Default, PartialEq)]
pub struct ListKeyResult {
    pub effect: Option<Effect>,
    pub quit: bool,
}

impl ListKeyResult {
    fn effect(effect: Effect) -> Self {
        Self {
            effect: Some(effect),
            quit: false,
        }
    }
}

pub fn handle_list_key(key: KeyEvent, ctx: &InputContext, state: &SharedState) -> ListKeyResult {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => apply(state, AppAction::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => apply(state, AppAction::SelectPrev),

        KeyCode::Char('d') | KeyCode::Delete => match &ctx.selected {
            Some((id, label)) => apply(
                state,
                AppAction::RequestDelete {
                    id: id.clone(),
                    label: label.clone(),
                },
            ),
            None => {
                debug!("Delete pressed with no meter selected");
                apply(state, AppAction::warning(NO_SELECTION_MESSAGE));
            }
        },

        KeyCode::Char('r') | KeyCode::F(5) => {
            if !ctx.refreshing {
                return ListKeyResult::effect(Effect::Refresh);
            }
        }

        KeyCode::Char('1') | KeyCode::Char('h') => {
            return ListKeyResult::effect(Effect::SwitchTab(Tab::Register));
        }
        KeyCode::Char('2') | KeyCode::Char('l') => {
            return ListKeyResult::effect(Effect::SwitchTab(Tab::Meters));
        }

        KeyCode::Char('q') => {
            return ListKeyResult {
                effect: None,
                quit: true,
            };
        }

        _ => {}
    }

    ListKeyResult::default()
}
