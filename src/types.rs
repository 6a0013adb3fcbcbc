use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A meter record as returned by the backend
///
/// Only `_id` is required. Text fields accept null and `parameter_id` accepts
/// any JSON value, so one malformed record does not hide the whole list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Meter {
    /// Server-assigned identifier, only used to address deletes
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub meter_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gateway_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gateway_token: String,

    /// Integer in practice, kept raw for display
    #[serde(default)]
    pub parameter_id: Value,

    /// Usually an ISO-8601 string; absent or null means the meter never reported
    #[serde(default)]
    pub last_inserted_timestamp: Option<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Meter {
    /// True when the meter has reported at least once
    pub fn has_reported(&self) -> bool {
        self.last_inserted_timestamp.is_some()
    }
}

/// Body of a create request, built from validated form input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeter {
    pub meter_id: String,
    pub gateway_key: String,
    pub gateway_token: String,
    pub parameter_id: i64,
}

/// Response envelope shared by every meters endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,

    pub data: Option<T>,

    pub message: Option<String>,
}

/// Tracks which top-level tab is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Register,
    Meters,
}

impl Tab {
    pub fn all() -> [Tab; 2] {
        [Tab::Register, Tab::Meters]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Register => "Register Meter",
            Tab::Meters => "Meter List",
        }
    }

    /// Function key that activates the tab from anywhere
    pub fn shortcut(&self) -> &'static str {
        match self {
            Tab::Register => "F1",
            Tab::Meters => "F2",
        }
    }
}

/// Notification severity, drives the colour of the toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

/// Fields of the registration form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    MeterId,
    GatewayKey,
    GatewayToken,
    ParameterId,
}

impl FormField {
    pub fn all() -> [FormField; 4] {
        [
            FormField::MeterId,
            FormField::GatewayKey,
            FormField::GatewayToken,
            FormField::ParameterId,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::MeterId => "Meter ID",
            FormField::GatewayKey => "Gateway Key",
            FormField::GatewayToken => "Gateway Token",
            FormField::ParameterId => "Parameter ID",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            FormField::MeterId => 0,
            FormField::GatewayKey => 1,
            FormField::GatewayToken => 2,
            FormField::ParameterId => 3,
        }
    }

    /// Next field, wrapping around
    pub fn next(&self) -> FormField {
        let fields = Self::all();
        fields[(self.index() + 1) % fields.len()]
    }

    /// Previous field, wrapping around
    pub fn prev(&self) -> FormField {
        let fields = Self::all();
        fields[(self.index() + fields.len() - 1) % fields.len()]
    }
}

/// Delete confirmation state machine
///
/// Idle -> Confirming (request) -> Deleting (confirm) -> Idle on success,
/// or back to Confirming on failure so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    Confirming {
        id: String,
        label: String,
    },
    Deleting {
        id: String,
        label: String,
    },
}

impl DeleteFlow {
    /// Internal id of the meter awaiting deletion, if any
    pub fn pending_id(&self) -> Option<&str> {
        match self {
            DeleteFlow::Idle => None,
            DeleteFlow::Confirming { id, .. } | DeleteFlow::Deleting { id, .. } => Some(id),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            DeleteFlow::Idle => None,
            DeleteFlow::Confirming { label, .. } | DeleteFlow::Deleting { label, .. } => {
                Some(label)
            }
        }
    }

    pub fn is_modal_open(&self) -> bool {
        !matches!(self, DeleteFlow::Idle)
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, DeleteFlow::Deleting { .. })
    }

    /// Open the confirmation for a meter. Ignored while a delete is in flight.
    pub fn request(&mut self, id: String, label: String) -> bool {
        if self.is_deleting() {
            return false;
        }
        *self = DeleteFlow::Confirming { id, label };
        true
    }

    /// Close the confirmation and forget the pending id.
    /// The modal is locked while the delete call is in flight.
    pub fn cancel(&mut self) -> bool {
        match self {
            DeleteFlow::Confirming { .. } => {
                *self = DeleteFlow::Idle;
                true
            }
            _ => false,
        }
    }

    /// Confirming -> Deleting, yielding the id to delete. No-op otherwise.
    pub fn begin(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DeleteFlow::Confirming { id, label } => {
                *self = DeleteFlow::Deleting {
                    id: id.clone(),
                    label,
                };
                Some(id)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Deleting -> Idle
    pub fn succeed(&mut self) {
        if self.is_deleting() {
            *self = DeleteFlow::Idle;
        }
    }

    /// Deleting -> Confirming, keeping the pending id so the user can retry
    pub fn fail(&mut self) {
        if let DeleteFlow::Deleting { id, label } = std::mem::take(self) {
            *self = DeleteFlow::Confirming { id, label };
        }
    }
}

/// Which of the list-panel regions are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListVisibility {
    pub loading: bool,
    pub table: bool,
    pub empty: bool,
}

impl Default for ListVisibility {
    fn default() -> Self {
        Self {
            loading: false,
            table: false,
            empty: true,
        }
    }
}

/// Side effects requested by input handling, run by the app as background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Load,
    Refresh,
    Submit,
    ConfirmDelete,
    SwitchTab(Tab),
}
