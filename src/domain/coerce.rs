//! Built-in coercion functions for [`OptionSpec`](super::OptionSpec).

use super::log_settings::{parse_level, SyslogFacility};
use super::value::OptionValue;

pub fn integer(raw: &str) -> Result<OptionValue, String> {
    raw.trim()
        .parse::<i64>()
        .map(OptionValue::Integer)
        .map_err(|_| "invalid integer".to_string())
}

pub fn flag(raw: &str) -> Result<OptionValue, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(OptionValue::Flag(true)),
        "0" | "false" | "no" | "off" => Ok(OptionValue::Flag(false)),
        _ => Err("expected one of true/false, yes/no, on/off, 1/0".to_string()),
    }
}

/// Text where an empty value means "not set".
pub fn optional_text(raw: &str) -> Result<OptionValue, String> {
    if raw.is_empty() {
        Ok(OptionValue::Unset)
    } else {
        Ok(OptionValue::Text(raw.to_string()))
    }
}

/// A level name or a number; the spelling as written is kept.
pub fn log_level(raw: &str) -> Result<OptionValue, String> {
    match parse_level(raw) {
        Some(_) => Ok(OptionValue::Text(raw.to_string())),
        None => Err(
            "expected NOTSET, TRACE, DEBUG, INFO, WARNING, ERROR, CRITICAL or a number".to_string(),
        ),
    }
}

pub fn syslog_facility(raw: &str) -> Result<OptionValue, String> {
    if raw.is_empty() {
        return Ok(OptionValue::Unset);
    }
    match SyslogFacility::from_name(raw) {
        Some(_) => Ok(OptionValue::Text(raw.to_string())),
        None => Err("unknown syslog facility".to_string()),
    }
}
