use crate::editor::FieldEditor;
use crate::notifications::Notifications;
use crate::types::{DeleteFlow, FormField, ListVisibility, Meter, Tab};
use crate::validation::MeterForm;
use std::sync::{Arc, RwLock};

/// State container shared by the draw loop and background tasks
pub type SharedState = Arc<RwLock<AppState>>;

/// Cached meter list and how the list panel presents it
#[derive(Debug, Clone, Default)]
pub struct DataState {
    /// Last successful list fetch, replaced wholesale on every reload
    pub meters: Vec<Meter>,
    pub visibility: ListVisibility,
    /// Highlighted table row
    pub selected: usize,
}

/// Registration form inputs
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: [FieldEditor; 4],
    pub focus: FormField,
    /// Create call in flight; the submit key is disabled meanwhile
    pub submitting: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            fields: Default::default(),
            focus: FormField::MeterId,
            submitting: false,
        }
    }
}

impl FormState {
    pub fn field(&self, field: FormField) -> &FieldEditor {
        &self.fields[field.index()]
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut FieldEditor {
        &mut self.fields[field.index()]
    }

    pub fn focused_mut(&mut self) -> &mut FieldEditor {
        let focus = self.focus;
        self.field_mut(focus)
    }

    /// Snapshot of the raw input for validation
    pub fn values(&self) -> MeterForm {
        MeterForm {
            meter_id: self.field(FormField::MeterId).content().to_string(),
            gateway_key: self.field(FormField::GatewayKey).content().to_string(),
            gateway_token: self.field(FormField::GatewayToken).content().to_string(),
            parameter_id: self.field(FormField::ParameterId).content().to_string(),
        }
    }

    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.clear();
        }
        self.focus = FormField::MeterId;
    }
}

/// Tab and button state that is not tied to one panel
#[derive(Debug, Clone)]
pub struct UiState {
    pub active_tab: Tab,
    /// Refresh in flight; the refresh key is disabled meanwhile
    pub refreshing: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Register,
            refreshing: false,
        }
    }
}

/// Main application state, shared between the draw loop and background tasks
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub data: DataState,
    pub form: FormState,
    pub delete: DeleteFlow,
    pub ui: UiState,
    pub notifications: Notifications,
}

impl AppState {
    /// Dashboard metric: number of cached meters
    pub fn total_meters(&self) -> usize {
        self.data.meters.len()
    }

    /// Dashboard metric: meters that have reported at least once
    pub fn active_meters(&self) -> usize {
        self.data.meters.iter().filter(|m| m.has_reported()).count()
    }

    pub fn selected_meter(&self) -> Option<&Meter> {
        self.data.meters.get(self.data.selected)
    }

    /// Check-and-set the submit busy flag. False when a create is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.form.submitting {
            return false;
        }
        self.form.submitting = true;
        true
    }

    /// Check-and-set the refresh busy flag. False when a refresh is already running.
    pub fn begin_refresh(&mut self) -> bool {
        if self.ui.refreshing {
            return false;
        }
        self.ui.refreshing = true;
        true
    }
}
