//! iCalendar RFC 5545 implementation.
//!
//! - `core`: value types (date-times, durations, recurrence rules, records)
//! - `parse`: RRULE validation and TEXT unescaping
//! - `build`: ICS serialization with escaping and line folding
//! - `expand`: recurrence expansion in local civil time
//!
//! ## Example
//!
//! ```rust
//! use kalend_rfc::rfc::ical::{compute_occurrences, RecurrenceSpec};
//!
//! let spec = RecurrenceSpec::new("FREQ=WEEKLY;COUNT=3", "2026-03-02T10:00:00")
//!     .with_tzid("America/New_York");
//! let occurrences = compute_occurrences(&spec).unwrap();
//! assert_eq!(occurrences[1].to_string(), "2026-03-09T10:00:00");
//! ```

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;

// Re-export commonly used items at module level
pub use build::{IcsOptions, IcsSerializer, serialize_calendar, serialize_event};
pub use core::{CalendarMetadata, EventRecord, EventStatus, LocalDateTime, RRule, RecurrenceId};
pub use expand::{Occurrence, RecurrenceSpec, compute_occurrences, resolve_local_to_utc};
pub use parse::{RRuleError, parse_rrule, validate_rrule};
