//! Registration form validation
//!
//! Runs synchronously before any network call. Every violated rule is
//! collected so the user sees them all in one notification.

use crate::types::NewMeter;
use thiserror::Error;

pub const MIN_METER_ID_LEN: usize = 3;
pub const MIN_GATEWAY_KEY_LEN: usize = 5;
pub const MIN_GATEWAY_TOKEN_LEN: usize = 5;

/// One or more form rules were violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation errors: {}", .violations.join(", "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

/// Raw form input, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeterForm {
    pub meter_id: String,
    pub gateway_key: String,
    pub gateway_token: String,
    pub parameter_id: String,
}

/// Trim the string fields, parse the parameter id and check every rule
pub fn validate(form: &MeterForm) -> Result<NewMeter, ValidationError> {
    let meter_id = form.meter_id.trim();
    let gateway_key = form.gateway_key.trim();
    let gateway_token = form.gateway_token.trim();
    let parameter_id = form.parameter_id.trim().parse::<i64>().ok();

    let mut violations = Vec::new();

    if meter_id.chars().count() < MIN_METER_ID_LEN {
        violations.push(format!(
            "Meter ID must be at least {MIN_METER_ID_LEN} characters long"
        ));
    }

    if gateway_key.chars().count() < MIN_GATEWAY_KEY_LEN {
        violations.push(format!(
            "Gateway Key must be at least {MIN_GATEWAY_KEY_LEN} characters long"
        ));
    }

    if gateway_token.chars().count() < MIN_GATEWAY_TOKEN_LEN {
        violations.push(format!(
            "Gateway Token must be at least {MIN_GATEWAY_TOKEN_LEN} characters long"
        ));
    }

    let parameter_id = match parameter_id {
        Some(id) if id >= 1 => id,
        _ => {
            violations.push("Parameter ID must be a positive number".to_string());
            0
        }
    };

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(NewMeter {
        meter_id: meter_id.to_string(),
        gateway_key: gateway_key.to_string(),
        gateway_token: gateway_token.to_string(),
        parameter_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(meter_id: &str, key: &str, token: &str, param: &str) -> MeterForm {
        MeterForm {
            meter_id: meter_id.to_string(),
            gateway_key: key.to_string(),
            gateway_token: token.to_string(),
            parameter_id: param.to_string(),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let meter = validate(&form("  M10 ", " KEY12", "TOK12 ", " 3 ")).unwrap();
        assert_eq!(meter.meter_id, "M10");
        assert_eq!(meter.gateway_key, "KEY12");
        assert_eq!(meter.gateway_token, "TOK12");
        assert_eq!(meter.parameter_id, 3);
    }

    #[test]
    fn test_short_meter_id() {
        let err = validate(&form("ab", "KEY12", "TOK12", "1")).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.to_string().contains("at least 3 characters"));
    }

    #[test]
    fn test_whitespace_does_not_count_towards_length() {
        let err = validate(&form("ab   ", "KEY12", "TOK12", "1")).unwrap_err();
        assert_eq!(err.violations.len(), 1);
    }

    #[test]
    fn test_all_violations_are_combined() {
        let err = validate(&form("", "k", "t", "0")).unwrap_err();
        assert_eq!(err.violations.len(), 4);

        let message = err.to_string();
        assert!(message.starts_with("Validation errors: "));
        assert!(message.contains("Meter ID"));
        assert!(message.contains("Gateway Key"));
        assert!(message.contains("Gateway Token"));
        assert!(message.contains("Parameter ID must be a positive number"));
    }

    #[test]
    fn test_parameter_id_must_be_integer() {
        for bad in ["", "abc", "-4", "1.5", "0"] {
            let err = validate(&form("M10", "KEY12", "TOK12", bad)).unwrap_err();
            assert_eq!(err.violations, vec!["Parameter ID must be a positive number"]);
        }
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // three characters, six bytes
        assert!(validate(&form("äöü", "KEY12", "TOK12", "1")).is_ok());
        // two characters, four bytes
        assert!(validate(&form("äö", "KEY12", "TOK12", "1")).is_err());
    }
}
