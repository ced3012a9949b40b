//! RRULE value parser (RFC 5545 §3.3.10).
//!
//! Splits the rule into `NAME=VALUE` parts, checks each part against the
//! accepted grammar and assembles a typed [`RRule`]. Any failure rejects
//! the whole rule.

use std::collections::HashSet;

use kalend_core::constants::MAX_RRULE_INTERVAL;

use super::RRuleError;
use crate::rfc::ical::core::{
    Frequency, LocalDateTime, RRule, RRuleUntil, RecurrenceBound, Weekday, WeekdayNum,
};

/// Frequencies RFC 5545 defines that are not expanded.
const SUB_DAILY_FREQUENCIES: [&str; 3] = ["SECONDLY", "MINUTELY", "HOURLY"];

/// ## Summary
/// Parses an RRULE value into a typed rule.
///
/// Accepts an optional leading `RRULE:` and case-insensitive part names.
///
/// ## Errors
/// Returns the first [`RRuleError`] encountered; no partial rule is produced.
pub fn parse_rrule(input: &str) -> Result<RRule, RRuleError> {
    let trimmed = input.trim();
    let body = trimmed
        .get(..6)
        .filter(|prefix| prefix.eq_ignore_ascii_case("RRULE:"))
        .map_or(trimmed, |_| &trimmed[6..]);

    if body.is_empty() {
        return Err(RRuleError::Empty);
    }

    let mut seen = HashSet::new();
    let mut freq = None;
    let mut interval = 1;
    let mut count = None;
    let mut until = None;
    let mut wkst = Weekday::Monday;
    let mut by_day = Vec::new();
    let mut by_monthday = Vec::new();
    let mut by_month = Vec::new();
    let mut by_setpos = Vec::new();

    for part in body.split(';') {
        let (name, value) = part
            .split_once('=')
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            .ok_or_else(|| RRuleError::MalformedPart(part.to_string()))?;
        let name = name.to_ascii_uppercase();

        if !seen.insert(name.clone()) {
            return Err(RRuleError::DuplicatePart(name));
        }

        match name.as_str() {
            "FREQ" => freq = Some(parse_frequency(value)?),
            "INTERVAL" => interval = parse_interval(value)?,
            "COUNT" => {
                count = Some(
                    value
                        .parse::<u32>()
                        .ok()
                        .filter(|c| *c > 0)
                        .ok_or_else(|| RRuleError::InvalidCount(value.to_string()))?,
                );
            }
            "UNTIL" => until = Some(parse_until(value)?),
            "WKST" => {
                wkst = Weekday::parse(value)
                    .ok_or_else(|| RRuleError::InvalidWeekStart(value.to_string()))?;
            }
            "BYDAY" => by_day = parse_list(value, parse_weekday_num, RRuleError::InvalidByDay)?,
            "BYMONTHDAY" => {
                by_monthday = parse_list(
                    value,
                    |token| {
                        token
                            .parse::<i8>()
                            .ok()
                            .filter(|d| (1..=31).contains(&d.unsigned_abs()))
                    },
                    RRuleError::InvalidByMonthDay,
                )?;
            }
            "BYMONTH" => {
                by_month = parse_list(
                    value,
                    |token| token.parse::<u8>().ok().filter(|m| (1..=12).contains(m)),
                    RRuleError::InvalidByMonth,
                )?;
            }
            "BYSETPOS" => {
                by_setpos = parse_list(
                    value,
                    |token| {
                        token
                            .parse::<i16>()
                            .ok()
                            .filter(|p| (1..=366).contains(&p.unsigned_abs()))
                    },
                    RRuleError::InvalidBySetPos,
                )?;
            }
            _ => return Err(RRuleError::UnknownPart(name)),
        }
    }

    let freq = freq.ok_or(RRuleError::MissingFrequency)?;

    let bound = match (count, until) {
        (Some(_), Some(_)) => return Err(RRuleError::CountAndUntil),
        (Some(count), None) => Some(RecurrenceBound::Count(count)),
        (None, Some(until)) => Some(RecurrenceBound::Until(until)),
        (None, None) => None,
    };

    Ok(RRule {
        freq,
        interval,
        bound,
        wkst,
        by_day,
        by_monthday,
        by_month,
        by_setpos,
    })
}

/// ## Summary
/// Checks an RRULE value against the accepted grammar.
///
/// ## Errors
/// Returns the reason the rule is rejected.
pub fn validate_rrule(input: &str) -> Result<(), RRuleError> {
    parse_rrule(input).map(|_| ())
}

impl std::str::FromStr for RRule {
    type Err = RRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s)
    }
}

fn parse_frequency(value: &str) -> Result<Frequency, RRuleError> {
    Frequency::parse(value).ok_or_else(|| {
        let upper = value.to_ascii_uppercase();
        if SUB_DAILY_FREQUENCIES.contains(&upper.as_str()) {
            RRuleError::UnsupportedFrequency(upper)
        } else {
            RRuleError::InvalidFrequency(value.to_string())
        }
    })
}

fn parse_interval(value: &str) -> Result<u32, RRuleError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|i| (1..MAX_RRULE_INTERVAL).contains(i))
        .ok_or_else(|| RRuleError::InvalidInterval(value.to_string()))
}

/// UNTIL accepts DATE, floating DATE-TIME and UTC DATE-TIME, in either the
/// basic (`20261231T235959Z`) or extended (`2026-12-31T23:59:59Z`) form.
fn parse_until(value: &str) -> Result<RRuleUntil, RRuleError> {
    let invalid = || RRuleError::InvalidUntil(value.to_string());

    let (local, is_utc) = match value.strip_suffix(['Z', 'z']) {
        Some(local) => (local, true),
        None => (value, false),
    };
    let parsed: LocalDateTime = local.parse().map_err(|_e| invalid())?;

    match (parsed.is_all_day(), is_utc) {
        (true, true) => Err(invalid()),
        (true, false) => Ok(RRuleUntil::Date(parsed.naive().date())),
        (false, true) => Ok(RRuleUntil::Utc(parsed.naive().and_utc())),
        (false, false) => Ok(RRuleUntil::Floating(parsed.naive())),
    }
}

/// Parses `[+|-][1-53]?WD`.
fn parse_weekday_num(token: &str) -> Option<WeekdayNum> {
    if !token.is_ascii() || token.len() < 2 {
        return None;
    }
    let (ordinal, code) = token.split_at(token.len() - 2);
    let weekday = Weekday::parse(code)?;

    if ordinal.is_empty() {
        return Some(WeekdayNum::every(weekday));
    }

    let ordinal = ordinal
        .parse::<i8>()
        .ok()
        .filter(|n| (1..=53).contains(&n.unsigned_abs()))?;
    Some(WeekdayNum::nth(ordinal, weekday))
}

fn parse_list<T>(
    value: &str,
    parse_item: impl Fn(&str) -> Option<T>,
    error: fn(String) -> RRuleError,
) -> Result<Vec<T>, RRuleError> {
    value
        .split(',')
        .map(|token| parse_item(token).ok_or_else(|| error(token.to_string())))
        .collect()
}
