//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;
use std::str::FromStr;

use crate::error::RfcError;

/// Duration value (RFC 5545 §3.3.6).
///
/// Represents a duration of time. iCalendar durations can be either:
/// - Week-based: `P1W` (1 week)
/// - Day/time-based: `P1DT2H30M` (1 day, 2 hours, 30 minutes)
///
/// Note: iCalendar does not support year/month designators in durations
/// because months have variable lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    /// Number of weeks (mutually exclusive with days/hours/minutes/seconds).
    pub weeks: u32,
    /// Number of days.
    pub days: u32,
    /// Number of hours.
    pub hours: u32,
    /// Number of minutes.
    pub minutes: u32,
    /// Number of seconds.
    pub seconds: u32,
}

impl FromStr for Duration {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RfcError::ValidationError(format!("invalid duration: {s:?}"));

        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let rest = rest.strip_prefix('P').ok_or_else(invalid)?;

        let mut duration = Self {
            negative,
            ..Self::default()
        };

        if let Some(weeks) = rest.strip_suffix('W') {
            duration.weeks = parse_component(weeks).ok_or_else(invalid)?;
            return Ok(duration);
        }

        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) if !time.is_empty() => (date, Some(time)),
            Some(_) => return Err(invalid()),
            None => (rest, None),
        };

        if !date_part.is_empty() {
            let days = date_part.strip_suffix('D').ok_or_else(invalid)?;
            duration.days = parse_component(days).ok_or_else(invalid)?;
        }

        if let Some(mut time) = time_part {
            // Designators must appear in H, M, S order.
            for (designator, slot) in [
                ('H', &mut duration.hours),
                ('M', &mut duration.minutes),
                ('S', &mut duration.seconds),
            ] {
                if let Some(pos) = time.find(designator) {
                    *slot = parse_component(&time[..pos]).ok_or_else(invalid)?;
                    time = &time[pos + 1..];
                }
            }
            if !time.is_empty() {
                return Err(invalid());
            }
        } else if date_part.is_empty() {
            return Err(invalid());
        }

        Ok(duration)
    }
}

fn parse_component(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }

        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }

        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if self.days == 0 {
            // Zero duration
            write!(f, "T0S")?;
        }

        Ok(())
    }
}
