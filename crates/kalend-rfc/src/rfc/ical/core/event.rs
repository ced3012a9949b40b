//! Event records handed to the serializer.

use serde::{Deserialize, Serialize};

/// VEVENT STATUS values (RFC 5545 §3.8.1.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Tentative => "TENTATIVE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Identifies a single modified instance of a series.
///
/// Only the timestamp form is written out as `RECURRENCE-ID`; an opaque
/// string is accepted on input and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecurrenceId {
    /// Instance start as a Unix timestamp in microseconds.
    Timestamp(i64),
    Opaque(String),
}

/// A single calendar event.
///
/// Local date-times (`dtstart`, `dtend`, `rdate`, `exdate`) are ISO-8601
/// strings without an offset; instants (`dtstamp`, `created`,
/// `last_modified`) are Unix microseconds. Missing required fields
/// deserialize to their empty value and are rejected at serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventRecord {
    pub uid: String,
    pub dtstamp: i64,
    pub summary: String,
    pub dtstart: String,
    pub dtstart_tzid: Option<String>,
    pub dtend: Option<String>,
    pub dtend_tzid: Option<String>,
    /// RFC 5545 duration such as `PT1H30M`. Ignored when `dtend` is set.
    pub duration: Option<String>,
    pub description: Option<String>,
    pub status: Option<EventStatus>,
    pub location: Option<String>,
    pub url: Option<String>,
    /// Edit counter; increases on every change.
    pub sequence: Option<u32>,
    pub last_modified: Option<i64>,
    pub created: Option<i64>,
    pub rrule: Option<String>,
    pub rdate: Vec<String>,
    pub exdate: Vec<String>,
    pub recurrence_id: Option<RecurrenceId>,
    pub image_uri: Option<String>,
}

impl EventRecord {
    /// Creates a record with the required fields set.
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        dtstamp: i64,
        summary: impl Into<String>,
        dtstart: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            dtstamp,
            summary: summary.into(),
            dtstart: dtstart.into(),
            ..Self::default()
        }
    }
}
