//! Local wall-clock and UTC DATE-TIME helpers (RFC 5545 §3.3.4, §3.3.5).
//!
//! Callers exchange local values as ISO-8601 strings without an offset
//! (`2026-03-02T10:00:00`). On the wire they become the basic iCalendar
//! forms (`20260302T100000`, or `20260302` for DATE values).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::error::{RfcError, RfcResult};

const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_DATE: &str = "%Y-%m-%d";
const ICAL_DATETIME: &str = "%Y%m%dT%H%M%S";
const ICAL_DATE: &str = "%Y%m%d";
const ICAL_UTC: &str = "%Y%m%dT%H%M%SZ";

/// A wall-clock value with no attached offset.
///
/// Either a full DATE-TIME or, when `all_day` is set, a DATE. The
/// textual form of an all-day value omits the time entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDateTime {
    naive: NaiveDateTime,
    all_day: bool,
}

impl LocalDateTime {
    /// Creates a DATE-TIME value, dropping sub-second precision.
    #[must_use]
    pub fn new(naive: NaiveDateTime) -> Self {
        Self {
            naive: naive.with_nanosecond(0).unwrap_or(naive),
            all_day: false,
        }
    }

    /// Creates a DATE value.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            naive: date.and_time(NaiveTime::MIN),
            all_day: true,
        }
    }

    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        self.all_day
    }

    /// Returns a value on `date` with this value's wall-clock time and form.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> Self {
        Self {
            naive: date.and_time(self.naive.time()),
            all_day: self.all_day,
        }
    }

    /// Formats the value in iCalendar basic form (no trailing `Z`).
    #[must_use]
    pub fn to_ical(&self) -> String {
        if self.all_day {
            self.naive.format(ICAL_DATE).to_string()
        } else {
            self.naive.format(ICAL_DATETIME).to_string()
        }
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_day {
            write!(f, "{}", self.naive.format(ISO_DATE))
        } else {
            write!(f, "{}", self.naive.format(ISO_DATETIME))
        }
    }
}

impl FromStr for LocalDateTime {
    type Err = RfcError;

    /// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD`
    /// and the iCalendar basic forms `YYYYMMDDTHHMMSS` / `YYYYMMDD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.ends_with(['Z', 'z']) || has_offset_suffix(s) {
            return Err(RfcError::ValidationError(format!(
                "local date-time must not carry an offset: {s}"
            )));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", ICAL_DATETIME] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::new(naive));
            }
        }
        for format in [ISO_DATE, ICAL_DATE] {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(Self::date(date));
            }
        }

        Err(RfcError::ValidationError(format!(
            "invalid local date-time: {s:?}"
        )))
    }
}

/// Detects `+HH:MM` / `-HHMM` style offsets after the time part.
fn has_offset_suffix(s: &str) -> bool {
    s.split_once('T')
        .is_some_and(|(_, time)| time.contains(['+', '-']))
}

/// ## Summary
/// Converts a Unix timestamp in microseconds to a UTC instant.
///
/// ## Errors
/// Returns `RfcError::ValidationError` if the timestamp is outside the
/// representable range.
pub fn utc_from_micros(micros: i64) -> RfcResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        RfcError::ValidationError(format!("timestamp out of range: {micros}"))
    })
}

/// Formats a UTC instant in iCalendar UTC form (`YYYYMMDDTHHMMSSZ`).
#[must_use]
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format(ICAL_UTC).to_string()
}
