//! RRULE validation errors.

use thiserror::Error;

use kalend_core::constants::MAX_RRULE_INTERVAL;

/// Reasons an RRULE value is rejected.
///
/// Each variant carries the offending token so the message can point the
/// caller at the exact part of the rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RRuleError {
    #[error("recurrence rule is empty")]
    Empty,

    #[error("malformed rule part {0:?}, expected NAME=VALUE")]
    MalformedPart(String),

    #[error("rule part {0} appears more than once")]
    DuplicatePart(String),

    #[error("unsupported rule part {0}")]
    UnknownPart(String),

    #[error("FREQ is required")]
    MissingFrequency,

    #[error("FREQ={0} is not supported, expected DAILY, WEEKLY, MONTHLY or YEARLY")]
    UnsupportedFrequency(String),

    #[error("invalid FREQ value {0:?}")]
    InvalidFrequency(String),

    #[error("INTERVAL must be between 1 and {max}, got {0:?}", max = MAX_RRULE_INTERVAL - 1)]
    InvalidInterval(String),

    #[error("COUNT must be a positive integer, got {0:?}")]
    InvalidCount(String),

    #[error("invalid UNTIL value {0:?}")]
    InvalidUntil(String),

    #[error("COUNT and UNTIL are mutually exclusive")]
    CountAndUntil,

    #[error("invalid BYDAY value {0:?}")]
    InvalidByDay(String),

    #[error("BYMONTHDAY values must be within -31..=-1 or 1..=31, got {0:?}")]
    InvalidByMonthDay(String),

    #[error("BYMONTH values must be within 1..=12, got {0:?}")]
    InvalidByMonth(String),

    #[error("BYSETPOS values must be within -366..=-1 or 1..=366, got {0:?}")]
    InvalidBySetPos(String),

    #[error("invalid WKST value {0:?}")]
    InvalidWeekStart(String),
}
