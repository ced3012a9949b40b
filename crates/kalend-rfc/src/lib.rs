//! Recurrence expansion and iCalendar (RFC 5545) export.
//!
//! - `rfc::ical::expand`: turns an RRULE plus RDATE/EXDATE into wall-clock occurrences
//! - `rfc::ical::build`: renders event records and calendars as ICS text
//! - `rfc::ical::parse`: RRULE grammar validation and TEXT unescaping
//! - `rfc::ical::core`: the value types shared by all of the above

pub mod error;
pub mod rfc;
