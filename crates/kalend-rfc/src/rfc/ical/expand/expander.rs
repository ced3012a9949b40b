//! RRULE expansion in local civil time (RFC 5545 §3.3.10).
//!
//! Periods advance over calendar dates, never over UTC instants, so every
//! generated occurrence keeps the wall-clock time of DTSTART. The UTC
//! instant is resolved per occurrence afterwards.

use std::collections::VecDeque;

use chrono::{Datelike, Days, Months, NaiveDate};

use super::recurrence::Occurrence;
use super::timezone::TimeZoneResolver;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{Frequency, LocalDateTime, RRule, RRuleUntil, WeekdayNum};

/// Years of consecutive empty periods after which expansion stops.
///
/// Covers a full leap cycle, so `FREQ=DAILY;BYMONTH=2;BYMONTHDAY=29` still
/// reaches its next match while `FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=30` ends.
const MAX_EMPTY_YEARS: u32 = 28;

/// Lower bound on the empty-period guard for coarse frequencies.
const MIN_EMPTY_PERIODS: u32 = 1000;

fn max_empty_periods(freq: Frequency) -> u32 {
    let per_year = match freq {
        Frequency::Daily => 366,
        Frequency::Weekly => 53,
        Frequency::Monthly => 12,
        Frequency::Yearly => 1,
    };
    (MAX_EMPTY_YEARS * per_year).max(MIN_EMPTY_PERIODS)
}

/// ## Summary
/// Iterates the occurrences generated by one RRULE.
///
/// DTSTART is always yielded first and counts toward COUNT. Later
/// occurrences come in ascending wall-clock order. The iterator ends when
/// COUNT or UNTIL is reached, or when [`MAX_EMPTY_YEARS`] worth of periods
/// in a row produce nothing; an unbounded rule is otherwise endless and
/// must be limited by the caller. Running past chrono's date range yields
/// a final `RfcError::ComputationError`.
pub struct RecurrenceExpander {
    dtstart: LocalDateTime,
    rule: RRule,
    tzid: Option<String>,
    resolver: TimeZoneResolver,
    /// First day of the week containing DTSTART, per WKST.
    week_start: NaiveDate,
    period: u64,
    pending: VecDeque<NaiveDate>,
    emitted: u32,
    empty_periods: u32,
    started: bool,
    finished: bool,
}

impl RecurrenceExpander {
    #[must_use]
    pub fn new(dtstart: LocalDateTime, rule: RRule, tzid: Option<String>) -> Self {
        let start_date = dtstart.naive().date();
        let back = days_from_week_start(start_date, &rule);
        let week_start = start_date
            .checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(start_date);

        Self {
            dtstart,
            rule,
            tzid,
            resolver: TimeZoneResolver::new(),
            week_start,
            period: 0,
            pending: VecDeque::new(),
            emitted: 0,
            empty_periods: 0,
            started: false,
            finished: false,
        }
    }

    /// Resolves a local value against this expander's zone.
    ///
    /// ## Errors
    /// Returns `RfcError::Timezone` if the zone is unknown or the value
    /// cannot be placed on the timeline.
    pub fn resolve(&mut self, local: LocalDateTime) -> RfcResult<Occurrence> {
        Ok(Occurrence::resolve(
            local,
            self.tzid.as_deref(),
            &mut self.resolver,
        )?)
    }

    fn emit(&mut self, local: LocalDateTime, is_dtstart: bool) -> Option<RfcResult<Occurrence>> {
        if self.rule.count().is_some_and(|count| self.emitted >= count) {
            self.finished = true;
            return None;
        }

        let occurrence = match self.resolve(local) {
            Ok(occurrence) => occurrence,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        if !is_dtstart && self.is_past_until(&occurrence) {
            self.finished = true;
            return None;
        }

        self.emitted += 1;
        Some(Ok(occurrence))
    }

    fn is_past_until(&self, occurrence: &Occurrence) -> bool {
        match self.rule.until() {
            None => false,
            Some(RRuleUntil::Date(date)) => occurrence.local().naive().date() > date,
            Some(RRuleUntil::Floating(until)) => occurrence.local().naive() > until,
            Some(RRuleUntil::Utc(until)) => occurrence.utc() > until,
        }
    }

    /// Loads the next period's candidates. Returns `false` once the rule
    /// has stopped matching.
    fn advance_period(&mut self) -> RfcResult<bool> {
        if self.empty_periods >= max_empty_periods(self.rule.freq) {
            return Ok(false);
        }

        let Some(candidates) = self.period_candidates(self.period) else {
            return Err(RfcError::ComputationError(format!(
                "recurrence period {} from {} is outside the supported date range",
                self.period, self.dtstart
            )));
        };
        self.period += 1;

        let start_date = self.dtstart.naive().date();
        if candidates.iter().any(|date| *date > start_date) {
            self.empty_periods = 0;
        } else {
            self.empty_periods += 1;
        }

        self.pending = candidates.into();
        Ok(true)
    }

    /// Returns the sorted candidate dates of period `index`, or `None` when
    /// the period lies outside the representable date range.
    fn period_candidates(&self, index: u64) -> Option<Vec<NaiveDate>> {
        let offset = index.checked_mul(u64::from(self.rule.interval))?;
        let start_date = self.dtstart.naive().date();

        let mut candidates = match self.rule.freq {
            Frequency::Daily => {
                let date = start_date.checked_add_days(Days::new(offset))?;
                vec![date]
            }
            Frequency::Weekly => self.weekly_candidates(offset)?,
            Frequency::Monthly => {
                let months = u32::try_from(offset).ok()?;
                let first = first_of_month(start_date).checked_add_months(Months::new(months))?;
                if self.rule.by_month.is_empty() || self.rule.by_month.contains(&month_u8(first)) {
                    self.month_candidates(first)?
                } else {
                    Vec::new()
                }
            }
            Frequency::Yearly => {
                let year = start_date
                    .year()
                    .checked_add(i32::try_from(offset).ok()?)?;
                self.year_candidates(year)?
            }
        };

        candidates.retain(|date| self.passes_limits(*date));
        candidates.sort_unstable();
        candidates.dedup();

        if !self.rule.by_setpos.is_empty() {
            candidates = select_positions(&candidates, &self.rule.by_setpos);
        }

        Some(candidates)
    }

    fn weekly_candidates(&self, offset: u64) -> Option<Vec<NaiveDate>> {
        let week = self
            .week_start
            .checked_add_days(Days::new(offset.checked_mul(7)?))?;
        let start_weekday = self.dtstart.naive().weekday();

        Some(
            (0..7)
                .filter_map(|i| week.checked_add_days(Days::new(i)))
                .filter(|date| {
                    if self.rule.by_day.is_empty() {
                        date.weekday() == start_weekday
                    } else {
                        self.rule
                            .by_day
                            .iter()
                            .any(|wd| wd.weekday.to_chrono() == date.weekday())
                    }
                })
                .collect(),
        )
    }

    /// Candidates within one month; BYDAY ordinals count within the month.
    fn month_candidates(&self, first: NaiveDate) -> Option<Vec<NaiveDate>> {
        let last = last_of_month(first)?;

        let dates = if self.rule.by_monthday.is_empty() && self.rule.by_day.is_empty() {
            first
                .with_day(self.dtstart.naive().day())
                .into_iter()
                .collect()
        } else if self.rule.by_monthday.is_empty() {
            self.rule
                .by_day
                .iter()
                .flat_map(|wd| weekdays_in_range(*wd, first, last))
                .collect()
        } else {
            self.rule
                .by_monthday
                .iter()
                .filter_map(|day| resolve_monthday(first, last, *day))
                .filter(|date| {
                    self.rule.by_day.is_empty()
                        || self
                            .rule
                            .by_day
                            .iter()
                            .any(|wd| weekday_num_matches(*wd, *date, first, last))
                })
                .collect()
        };

        Some(dates)
    }

    /// Candidates within one year. BYMONTH or BYMONTHDAY scope the
    /// expansion to months; a bare BYDAY counts ordinals across the year.
    fn year_candidates(&self, year: i32) -> Option<Vec<NaiveDate>> {
        let start = self.dtstart.naive();

        if !self.rule.by_month.is_empty() || !self.rule.by_monthday.is_empty() {
            let months: Vec<u32> = if self.rule.by_month.is_empty() {
                (1..=12).collect()
            } else {
                self.rule.by_month.iter().map(|m| u32::from(*m)).collect()
            };

            let mut dates = Vec::new();
            for month in months {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                dates.extend(self.month_candidates(first)?);
            }
            return Some(dates);
        }

        if !self.rule.by_day.is_empty() {
            let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
            return Some(
                self.rule
                    .by_day
                    .iter()
                    .flat_map(|wd| weekdays_in_range(*wd, first, last))
                    .collect(),
            );
        }

        // Out-of-range years end the iteration; Feb 29 starts skip common years.
        NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(
            NaiveDate::from_ymd_opt(year, start.month(), start.day())
                .into_iter()
                .collect(),
        )
    }

    /// BY* parts that only limit, never expand, for the rule's frequency.
    fn passes_limits(&self, date: NaiveDate) -> bool {
        let rule = &self.rule;

        if !rule.by_month.is_empty() && !rule.by_month.contains(&month_u8(date)) {
            return false;
        }

        if matches!(rule.freq, Frequency::Monthly | Frequency::Yearly) {
            return true;
        }

        let monthday_ok = rule.by_monthday.is_empty()
            || last_of_month(date).is_some_and(|last| {
                rule.by_monthday
                    .iter()
                    .any(|day| resolve_monthday(first_of_month(date), last, *day) == Some(date))
            });
        // Weekly rules already expanded BYDAY; ordinals are ignored below monthly.
        let weekday_ok = rule.freq == Frequency::Weekly
            || rule.by_day.is_empty()
            || rule
                .by_day
                .iter()
                .any(|wd| wd.weekday.to_chrono() == date.weekday());
        monthday_ok && weekday_ok
    }
}

impl Iterator for RecurrenceExpander {
    type Item = RfcResult<Occurrence>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            return self.emit(self.dtstart, true);
        }

        loop {
            if let Some(date) = self.pending.pop_front() {
                let local = self.dtstart.on(date);
                if local <= self.dtstart {
                    continue;
                }
                return self.emit(local, false);
            }

            match self.advance_period() {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn days_from_week_start(date: NaiveDate, rule: &RRule) -> u32 {
    let day = date.weekday().num_days_from_monday();
    let wkst = rule.wkst.to_chrono().num_days_from_monday();
    (7 + day - wkst) % 7
}

fn month_u8(date: NaiveDate) -> u8 {
    u8::try_from(date.month()).unwrap_or(0)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    first_of_month(first)
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Maps a BYMONTHDAY value (negative counts from the end) onto a date.
fn resolve_monthday(first: NaiveDate, last: NaiveDate, day: i8) -> Option<NaiveDate> {
    let days_in_month = i32::try_from(last.day()).ok()?;
    let day = i32::from(day);
    let resolved = if day > 0 { day } else { days_in_month + day + 1 };
    if resolved < 1 || resolved > days_in_month {
        return None;
    }
    first.with_day(u32::try_from(resolved).ok()?)
}

/// All dates in `[first, last]` selected by a BYDAY entry.
fn weekdays_in_range(wd: WeekdayNum, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let target = wd.weekday.to_chrono();
    let mut matching = Vec::new();
    let mut cursor = Some(first);
    while let Some(date) = cursor.filter(|date| *date <= last) {
        if date.weekday() == target {
            matching.push(date);
            cursor = date.checked_add_days(Days::new(7));
        } else {
            cursor = date.succ_opt();
        }
    }

    match wd.ordinal {
        None => matching,
        Some(n) => {
            let len = matching.len();
            let index = if n > 0 {
                usize::try_from(n - 1).ok()
            } else {
                len.checked_sub(usize::from(n.unsigned_abs()))
            };
            index
                .and_then(|i| matching.get(i).copied())
                .into_iter()
                .collect()
        }
    }
}

fn weekday_num_matches(wd: WeekdayNum, date: NaiveDate, first: NaiveDate, last: NaiveDate) -> bool {
    if wd.weekday.to_chrono() != date.weekday() {
        return false;
    }
    wd.ordinal.is_none() || weekdays_in_range(wd, first, last).contains(&date)
}

/// Applies BYSETPOS to a sorted candidate set.
fn select_positions(candidates: &[NaiveDate], positions: &[i16]) -> Vec<NaiveDate> {
    let len = candidates.len();
    let mut picked: Vec<NaiveDate> = positions
        .iter()
        .filter_map(|pos| {
            let index = if *pos > 0 {
                usize::try_from(pos - 1).ok()?
            } else {
                len.checked_sub(usize::from(pos.unsigned_abs()))?
            };
            candidates.get(index).copied()
        })
        .collect();
    picked.sort_unstable();
    picked.dedup();
    picked
}
