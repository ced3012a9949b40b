/// Product name used in generated identifiers.
pub const APP_NAME: &str = "Kalend";

/// Default `PRODID` for generated calendars (RFC 5545 §3.7.3).
pub const PRODID: &str = const_str::concat!("-//", APP_NAME, "//", APP_NAME, " Calendar//EN");

/// Media type for serialized iCalendar feeds (RFC 5545 §8.1).
pub const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

/// Default cap on expanded occurrences when the caller gives none.
pub const DEFAULT_MAX_OCCURRENCES: usize = 500;

/// Exclusive upper bound for the RRULE `INTERVAL` part.
pub const MAX_RRULE_INTERVAL: u32 = 1000;
