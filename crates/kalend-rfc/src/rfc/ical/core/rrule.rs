//! iCalendar RRULE (Recurrence Rule) value type (RFC 5545 §3.3.10, §3.8.5.3).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Recurrence frequency (RFC 5545 §3.3.10).
///
/// Only day-granular frequencies are expanded; sub-daily frequencies are
/// rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday with optional occurrence number.
///
/// Used in BYDAY rule part. Examples:
/// - `MO` - every Monday
/// - `1MO` - first Monday of the month/year
/// - `-1FR` - last Friday of the month/year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Optional occurrence number (-53 to 53, excluding 0).
    pub ordinal: Option<i8>,
    /// The day of the week.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Creates a weekday occurrence without an ordinal.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// Creates a weekday occurrence with an ordinal.
    ///
    /// ## Panics
    ///
    /// Panics if ordinal is 0 or outside the range -53..=53.
    #[must_use]
    pub fn nth(ordinal: i8, weekday: Weekday) -> Self {
        assert!(ordinal != 0 && (-53..=53).contains(&ordinal));
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// UNTIL value for RRULE - a DATE, a floating DATE-TIME or a UTC DATE-TIME.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RRuleUntil {
    /// Date-only boundary (inclusive through the end of that local day).
    Date(NaiveDate),
    /// Wall-clock boundary, compared against local occurrence times.
    Floating(NaiveDateTime),
    /// Absolute boundary, compared against resolved UTC instants.
    Utc(DateTime<Utc>),
}

impl fmt::Display for RRuleUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y%m%d")),
            Self::Floating(dt) => write!(f, "{}", dt.format("%Y%m%dT%H%M%S")),
            Self::Utc(dt) => write!(f, "{}", dt.format("%Y%m%dT%H%M%SZ")),
        }
    }
}

/// How a recurrence ends. COUNT and UNTIL are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceBound {
    Count(u32),
    Until(RRuleUntil),
}

/// Recurrence rule (RFC 5545 §3.3.10, §3.8.5.3).
///
/// Produced by [`crate::rfc::ical::parse::parse_rrule`]; every field has
/// already been range-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRule {
    /// Recurrence frequency.
    pub freq: Frequency,

    /// Recurrence interval (default: 1).
    pub interval: u32,

    /// COUNT or UNTIL; `None` means the rule repeats indefinitely.
    pub bound: Option<RecurrenceBound>,

    /// Week start day (default: Monday).
    pub wkst: Weekday,

    /// By-day list with optional occurrence numbers.
    pub by_day: Vec<WeekdayNum>,

    /// By-monthday list (-31 to 31, excluding 0).
    pub by_monthday: Vec<i8>,

    /// By-month list (1-12).
    pub by_month: Vec<u8>,

    /// By-setpos list (-366 to 366, excluding 0).
    /// Filters on position within the frequency period.
    pub by_setpos: Vec<i16>,
}

impl RRule {
    /// Creates a rule with the given frequency and default parts.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            bound: None,
            wkst: Weekday::Monday,
            by_day: Vec::new(),
            by_monthday: Vec::new(),
            by_month: Vec::new(),
            by_setpos: Vec::new(),
        }
    }

    /// Creates a daily recurrence rule.
    #[must_use]
    pub const fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    /// Creates a weekly recurrence rule.
    #[must_use]
    pub const fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    /// Creates a monthly recurrence rule.
    #[must_use]
    pub const fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Creates a yearly recurrence rule.
    #[must_use]
    pub const fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the count, replacing any UNTIL.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.bound = Some(RecurrenceBound::Count(count));
        self
    }

    /// Sets the until boundary, replacing any COUNT.
    #[must_use]
    pub fn with_until(mut self, until: RRuleUntil) -> Self {
        self.bound = Some(RecurrenceBound::Until(until));
        self
    }

    /// Sets the by-day list.
    #[must_use]
    pub fn with_by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = days;
        self
    }

    /// Sets the by-monthday list.
    #[must_use]
    pub fn with_by_monthday(mut self, days: Vec<i8>) -> Self {
        self.by_monthday = days;
        self
    }

    /// Sets the by-month list.
    #[must_use]
    pub fn with_by_month(mut self, months: Vec<u8>) -> Self {
        self.by_month = months;
        self
    }

    /// Sets the by-setpos list.
    #[must_use]
    pub fn with_by_setpos(mut self, positions: Vec<i16>) -> Self {
        self.by_setpos = positions;
        self
    }

    /// Sets the week start day.
    #[must_use]
    pub fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = wkst;
        self
    }

    /// Returns the COUNT part, if any.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        match self.bound {
            Some(RecurrenceBound::Count(count)) => Some(count),
            _ => None,
        }
    }

    /// Returns the UNTIL part, if any.
    #[must_use]
    pub fn until(&self) -> Option<RRuleUntil> {
        match self.bound {
            Some(RecurrenceBound::Until(until)) => Some(until),
            _ => None,
        }
    }
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: ToString>(items: &[T]) -> String {
            items.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
        }

        let mut parts = vec![format!("FREQ={}", self.freq)];

        if self.interval != 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }

        match self.bound {
            Some(RecurrenceBound::Count(count)) => parts.push(format!("COUNT={count}")),
            Some(RecurrenceBound::Until(until)) => parts.push(format!("UNTIL={until}")),
            None => {}
        }

        if self.wkst != Weekday::Monday {
            parts.push(format!("WKST={}", self.wkst));
        }

        if !self.by_day.is_empty() {
            parts.push(format!("BYDAY={}", join(&self.by_day)));
        }

        if !self.by_monthday.is_empty() {
            parts.push(format!("BYMONTHDAY={}", join(&self.by_monthday)));
        }

        if !self.by_month.is_empty() {
            parts.push(format!("BYMONTH={}", join(&self.by_month)));
        }

        if !self.by_setpos.is_empty() {
            parts.push(format!("BYSETPOS={}", join(&self.by_setpos)));
        }

        write!(f, "{}", parts.join(";"))
    }
}
