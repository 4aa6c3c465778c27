//! Submission validation.
//!
//! Checks only the minimal required shape: a structured object with a
//! non-blank `title` and a parseable `startTime`. Everything else is
//! deliberately unchecked passthrough, trading strictness for submission
//! flexibility.

use crate::domain::errors::ModerationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Validate a submission payload, returning the underlying object on
/// success.
pub fn validate_submission(payload: &Value) -> Result<&Map<String, Value>, ModerationError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ModerationError::Validation("payload must be a JSON object".into()))?;

    match obj.get("title").and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => {}
        Some(_) => {
            return Err(ModerationError::Validation(
                "title must not be blank".into(),
            ))
        }
        None => return Err(ModerationError::Validation("title is required".into())),
    }

    match obj.get("startTime").and_then(Value::as_str) {
        Some(start_time) if parses_as_instant(start_time) => {}
        Some(_) => {
            return Err(ModerationError::Validation(
                "startTime must be an ISO-8601 timestamp".into(),
            ))
        }
        None => return Err(ModerationError::Validation("startTime is required".into())),
    }

    Ok(obj)
}

/// Accept the common ISO-8601 shapes: full RFC 3339, a local datetime
/// without offset, and a bare date.
fn parses_as_instant(s: &str) -> bool {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
