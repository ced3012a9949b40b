//! Recurrence expansion for calendar events.
//!
//! Rules are expanded in local civil time and each occurrence is then
//! placed on the UTC timeline through `chrono-tz`.

mod expander;
mod recurrence;
mod timezone;

pub use expander::RecurrenceExpander;
pub use recurrence::{Occurrence, RecurrenceSpec, compute_occurrences};
pub use timezone::{
    ConversionError, TimeZoneResolver, convert_to_utc, convert_to_utc_lenient,
    resolve_local_to_utc,
};
