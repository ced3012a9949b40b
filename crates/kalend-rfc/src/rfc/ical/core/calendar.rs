//! Calendar metadata for published feeds.

use serde::{Deserialize, Serialize};

/// Calendar-level properties of a published feed.
///
/// Events are not owned here; they are passed to the serializer separately.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarMetadata {
    /// Display name, 1 to 100 characters.
    pub name: String,
    pub description: Option<String>,
    /// IANA time zone id, written as `X-WR-TIMEZONE`.
    pub timezone: Option<String>,
    /// `#RRGGBB` hex color.
    pub color: Option<String>,
    pub url: Option<String>,
}

impl CalendarMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
