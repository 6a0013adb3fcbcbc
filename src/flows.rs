//! User-triggered workflows that talk to the backend
//!
//! Each flow takes the API client and the shared state, drives the state
//! through `AppAction`s around a single API call, and reports the outcome as
//! a notification. Locks are only held inside `apply`, never across `.await`.
//!
//! The app spawns these on the tokio runtime so the UI keeps drawing while a
//! request is in flight; the busy flags keep one flow of each kind running.

use crate::actions::{apply, apply_many, AppAction};
use crate::api::{ApiError, MeterApi};
use crate::state::{AppState, SharedState};
use crate::types::Tab;
use crate::validation::{validate, ValidationError};
use tracing::{debug, info, warn};

pub const CREATED_MESSAGE: &str = "Meter registered successfully!";
pub const DUPLICATE_MESSAGE: &str = "A meter with this ID already exists";
pub const DELETED_MESSAGE: &str = "Meter deleted successfully!";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created,
    Invalid(ValidationError),
    /// A create was already in flight
    Busy,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing was awaiting confirmation
    Ignored,
    Failed(ApiError),
}

/// Run `f` under the write lock; `None` if the lock is poisoned
fn with_state<R>(state: &SharedState, f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
    state.write().ok().map(|mut s| f(&mut s))
}

/// Fetch the list and replace the cache.
///
/// Failures are notified and leave the empty-state placeholder showing; the
/// previous cache is kept. The error is returned so callers can log it.
pub async fn load_meters<A: MeterApi>(api: &A, state: &SharedState) -> Result<(), ApiError> {
    apply(state, AppAction::SetLoading(true));

    let result = match api.list_meters().await {
        Ok(meters) => {
            debug!(count = meters.len(), "Replacing meter cache");
            apply(state, AppAction::ReplaceMeters(meters));
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Failed to load meters");
            apply_many(
                state,
                vec![
                    AppAction::error(format!("Error loading meters: {e}")),
                    AppAction::ShowEmptyState,
                ],
            );
            Err(e)
        }
    };

    apply(state, AppAction::SetLoading(false));
    result
}

/// Reload behind the refresh busy flag, which is always cleared afterwards
pub async fn refresh<A: MeterApi>(api: &A, state: &SharedState) -> Result<(), ApiError> {
    if !with_state(state, AppState::begin_refresh).unwrap_or(false) {
        debug!("Refresh already running");
        return Ok(());
    }

    let result = load_meters(api, state).await;
    apply(state, AppAction::SetRefreshing(false));
    result
}

/// Activate a tab; the list tab always re-fetches
pub async fn switch_tab<A: MeterApi>(api: &A, state: &SharedState, tab: Tab) {
    apply(state, AppAction::SwitchTab(tab));

    if tab == Tab::Meters {
        // Already notified inside load_meters
        let _ = load_meters(api, state).await;
    }
}

/// Validate the registration form and create the meter.
///
/// On success the form is cleared and the list tab is shown (which reloads).
/// The submit busy flag is cleared whatever the outcome.
pub async fn submit_form<A: MeterApi>(api: &A, state: &SharedState) -> SubmitOutcome {
    let Some(form) = state.read().ok().map(|s| s.form.values()) else {
        return SubmitOutcome::Busy;
    };

    let new_meter = match validate(&form) {
        Ok(meter) => meter,
        Err(e) => {
            debug!(violations = e.violations.len(), "Form rejected");
            apply(state, AppAction::error(e.to_string()));
            return SubmitOutcome::Invalid(e);
        }
    };

    if !with_state(state, AppState::begin_submit).unwrap_or(false) {
        debug!("Create already in flight");
        return SubmitOutcome::Busy;
    }

    let outcome = match api.create_meter(&new_meter).await {
        Ok(()) => {
            info!(meter_id = %new_meter.meter_id, "Meter registered");
            apply_many(
                state,
                vec![AppAction::success(CREATED_MESSAGE), AppAction::ResetForm],
            );
            switch_tab(api, state, Tab::Meters).await;
            SubmitOutcome::Created
        }
        Err(e) => {
            warn!(error = %e, meter_id = %new_meter.meter_id, "Failed to register meter");
            let message = if e.is_duplicate() {
                DUPLICATE_MESSAGE.to_string()
            } else {
                e.to_string()
            };
            apply(state, AppAction::error(message));
            SubmitOutcome::Failed(e)
        }
    };

    apply(state, AppAction::SetSubmitting(false));
    outcome
}

/// Delete the meter awaiting confirmation.
///
/// Success closes the modal and reloads the list. Failure keeps the modal
/// open with the same pending id so the user can retry or cancel.
pub async fn confirm_delete<A: MeterApi>(api: &A, state: &SharedState) -> DeleteOutcome {
    let Some(id) = with_state(state, |s| s.delete.begin()).flatten() else {
        debug!("Confirm ignored, no delete pending");
        return DeleteOutcome::Ignored;
    };

    match api.delete_meter(&id).await {
        Ok(()) => {
            apply_many(
                state,
                vec![AppAction::success(DELETED_MESSAGE), AppAction::DeleteSucceeded],
            );
            let _ = load_meters(api, state).await;
            DeleteOutcome::Deleted
        }
        Err(e) => {
            warn!(error = %e, id, "Failed to delete meter");
            apply_many(
                state,
                vec![
                    AppAction::error(format!("Error deleting meter: {e}")),
                    AppAction::DeleteFailed,
                ],
            );
            DeleteOutcome::Failed(e)
        }
    }
}
