//! The signal record and its moderation status.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Moderation status of a signal record.
///
/// Always matches the collection the record currently resides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    /// Awaiting moderation, not publicly visible.
    Pending,
    /// Published for public read.
    Approved,
}

/// A crowd-submitted event report.
///
/// The wire and on-disk representation uses camelCase field names. Only
/// `title` and `startTime` are validated at intake; everything else is
/// unchecked passthrough, so the optional fields are kept free-form and
/// any client-supplied fields beyond the known set travel in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Globally unique, system-assigned identifier (`sig-*` when minted).
    pub id: String,
    /// Event title; non-empty after trimming.
    pub title: String,
    /// ISO-8601 timestamp string for the event start.
    #[serde(rename = "startTime")]
    pub start_time: String,
    /// Free-form location info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    /// Optional contact info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,
    /// Optional free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Value>,
    /// Optional topic tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Value>,
    /// Moderation status.
    pub status: SignalStatus,
    /// Intake timestamp, RFC 3339.
    #[serde(rename = "submittedAt")]
    pub submitted_at: String,
    /// Approval timestamp, RFC 3339. Present iff `status == Approved`.
    #[serde(rename = "approvedAt", default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    /// Unrecognized client-supplied fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SignalRecord {
    /// Build a pending record from a validated submission payload.
    ///
    /// The caller has already run the validator, so `title` and `startTime`
    /// are known to be present strings. System-owned fields (`status`,
    /// `submittedAt`, `approvedAt`, and `id`) are stripped from the payload;
    /// the id the record carries is the one the engine assigned.
    pub fn from_submission(
        mut payload: Map<String, Value>,
        id: String,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let title = take_string(&mut payload, "title").unwrap_or_default();
        let start_time = take_string(&mut payload, "startTime").unwrap_or_default();
        let location = payload.remove("location");
        let contact = payload.remove("contact");
        let note = payload.remove("note");
        let topic = payload.remove("topic");

        // System-owned fields are never taken from the client.
        payload.remove("id");
        payload.remove("status");
        payload.remove("submittedAt");
        payload.remove("approvedAt");

        Self {
            id,
            title,
            start_time,
            location,
            contact,
            note,
            topic,
            status: SignalStatus::Pending,
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            approved_at: None,
            extra: payload,
        }
    }

    /// Transition this record to `approved`, stamping `approvedAt`.
    pub fn into_approved(mut self, approved_at: DateTime<Utc>) -> Self {
        self.status = SignalStatus::Approved;
        self.approved_at = Some(approved_at.to_rfc3339_opts(SecondsFormat::Millis, true));
        self
    }
}

fn take_string(payload: &mut Map<String, Value>, key: &str) -> Option<String> {
    match payload.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            // Not a string; leave it visible as a passthrough field.
            payload.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}
