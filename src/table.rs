//! Projection of meter records into display rows
//!
//! Pure functions only: the draw code renders whatever `project_rows`
//! returns, so the same list always yields the same rows.

use crate::types::Meter;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How the "Last Inserted" column renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampCell {
    Never,
    At(String),
    Invalid,
}

impl TimestampCell {
    pub fn text(&self) -> &str {
        match self {
            TimestampCell::Never => "Never",
            TimestampCell::At(formatted) => formatted,
            TimestampCell::Invalid => "Invalid",
        }
    }
}

/// One table row, every text field already sanitized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterRow {
    pub id: String,
    pub meter_id: String,
    pub gateway_key: String,
    pub gateway_token: String,
    pub parameter_id: String,
    pub last_inserted: TimestampCell,
}

pub fn project_rows(meters: &[Meter]) -> Vec<MeterRow> {
    meters.iter().map(project_row).collect()
}

pub fn project_row(meter: &Meter) -> MeterRow {
    MeterRow {
        id: meter.id.clone(),
        meter_id: sanitize(&meter.meter_id),
        gateway_key: sanitize(&meter.gateway_key),
        gateway_token: sanitize(&meter.gateway_token),
        parameter_id: value_text(&meter.parameter_id),
        last_inserted: format_timestamp(meter.last_inserted_timestamp.as_ref()),
    }
}

/// Make server-supplied text inert for the terminal.
///
/// Control characters (ESC, BEL, CR, ...) would otherwise be able to move the
/// cursor or restyle the screen; they are replaced by their escaped form.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    out
}

/// Display text for a loosely typed scalar; strings are shown unquoted
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => sanitize(s),
        other => other.to_string(),
    }
}

/// Format a raw timestamp value in local time
pub fn format_timestamp(raw: Option<&Value>) -> TimestampCell {
    let parsed = match raw {
        None | Some(Value::Null) => return TimestampCell::Never,
        Some(Value::String(s)) if s.trim().is_empty() => return TimestampCell::Never,
        Some(Value::String(s)) => parse_timestamp(s.trim()),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        Some(_) => None,
    };

    match parsed {
        Some(utc) => TimestampCell::At(
            utc.with_timezone(&Local)
                .format(DATE_TIME_FORMAT)
                .to_string(),
        ),
        None => TimestampCell::Invalid,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Date-time without offset reads as local time
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    // Date-only reads as UTC midnight
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
