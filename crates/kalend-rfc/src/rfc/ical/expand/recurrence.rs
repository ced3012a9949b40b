//! Recurrence sets: RRULE expansion combined with RDATE and EXDATE.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kalend_core::constants::DEFAULT_MAX_OCCURRENCES;

use super::expander::RecurrenceExpander;
use super::timezone::{ConversionError, TimeZoneResolver, convert_to_utc_lenient};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::LocalDateTime;
use crate::rfc::ical::parse::parse_rrule;

/// One concrete instance of a recurring event.
///
/// Ordered by UTC instant, then by wall-clock value. `Display` yields the
/// local form, matching the DTSTART it was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    utc: DateTime<Utc>,
    local: LocalDateTime,
}

impl Occurrence {
    /// ## Summary
    /// Places a local value on the timeline.
    ///
    /// Floating values (no TZID) map 1:1 onto UTC.
    ///
    /// ## Errors
    /// Returns a `ConversionError` for an unknown zone or an unresolvable gap.
    pub fn resolve(
        local: LocalDateTime,
        tzid: Option<&str>,
        resolver: &mut TimeZoneResolver,
    ) -> Result<Self, ConversionError> {
        let utc = match tzid {
            Some(tzid) => convert_to_utc_lenient(local.naive(), tzid, resolver)?,
            None => local.naive().and_utc(),
        };
        Ok(Self { utc, local })
    }

    #[must_use]
    pub const fn local(&self) -> LocalDateTime {
        self.local
    }

    #[must_use]
    pub const fn utc(&self) -> DateTime<Utc> {
        self.utc
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.local, f)
    }
}

fn default_max_count() -> usize {
    DEFAULT_MAX_OCCURRENCES
}

/// Input for [`compute_occurrences`].
///
/// Date-time strings are local ISO-8601 values without an offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceSpec {
    pub rrule: String,
    pub dtstart: String,
    /// IANA zone of `dtstart`; absent means floating time.
    #[serde(default)]
    pub dtstart_tzid: Option<String>,
    /// Upper bound on the number of occurrences returned.
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    #[serde(default)]
    pub rdate: Vec<String>,
    #[serde(default)]
    pub exdate: Vec<String>,
}

impl RecurrenceSpec {
    #[must_use]
    pub fn new(rrule: impl Into<String>, dtstart: impl Into<String>) -> Self {
        Self {
            rrule: rrule.into(),
            dtstart: dtstart.into(),
            dtstart_tzid: None,
            max_count: DEFAULT_MAX_OCCURRENCES,
            rdate: Vec::new(),
            exdate: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.dtstart_tzid = Some(tzid.into());
        self
    }

    #[must_use]
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    #[must_use]
    pub fn with_rdate(mut self, rdate: impl Into<String>) -> Self {
        self.rdate.push(rdate.into());
        self
    }

    #[must_use]
    pub fn with_exdate(mut self, exdate: impl Into<String>) -> Self {
        self.exdate.push(exdate.into());
        self
    }
}

/// Parses a list of RDATE/EXDATE values, requiring DTSTART's form.
fn parse_local_list(
    property: &str,
    values: &[String],
    dtstart: LocalDateTime,
) -> RfcResult<Vec<LocalDateTime>> {
    values
        .iter()
        .map(|value| {
            let parsed: LocalDateTime = value.parse()?;
            if parsed.is_all_day() == dtstart.is_all_day() {
                Ok(parsed)
            } else {
                Err(RfcError::ValidationError(format!(
                    "{property} value {value:?} must use the same DATE or DATE-TIME form as DTSTART"
                )))
            }
        })
        .collect()
}

/// ## Summary
/// Computes the ordered occurrences of a recurrence set.
///
/// The result is `(RRULE ∪ RDATE) \ EXDATE`: deduplicated, sorted by UTC
/// instant and truncated to `max_count`. Every value keeps DTSTART's
/// wall-clock time regardless of DST transitions in between.
///
/// ## Errors
/// Fails before expanding anything if the rule, DTSTART, an RDATE or
/// EXDATE value, or the TZID is invalid.
pub fn compute_occurrences(spec: &RecurrenceSpec) -> RfcResult<Vec<Occurrence>> {
    let rule = parse_rrule(&spec.rrule)?;
    let dtstart: LocalDateTime = spec.dtstart.parse()?;
    let rdates = parse_local_list("RDATE", &spec.rdate, dtstart)?;
    let exdates: HashSet<LocalDateTime> = parse_local_list("EXDATE", &spec.exdate, dtstart)?
        .into_iter()
        .collect();

    if let Some(tzid) = spec.dtstart_tzid.as_deref() {
        TimeZoneResolver::new().resolve(tzid)?;
    }

    if spec.max_count == 0 {
        return Ok(Vec::new());
    }

    let mut expander = RecurrenceExpander::new(dtstart, rule, spec.dtstart_tzid.clone());

    let mut occurrences = Vec::new();
    for occurrence in expander.by_ref() {
        let occurrence = occurrence?;
        if exdates.contains(&occurrence.local()) {
            continue;
        }
        occurrences.push(occurrence);
        if occurrences.len() >= spec.max_count {
            break;
        }
    }

    for rdate in rdates {
        if !exdates.contains(&rdate) {
            occurrences.push(expander.resolve(rdate)?);
        }
    }

    occurrences.sort_unstable();
    occurrences.dedup_by_key(|occurrence| occurrence.local());
    occurrences.truncate(spec.max_count);

    tracing::debug!(
        rrule = %spec.rrule,
        dtstart = %spec.dtstart,
        tzid = spec.dtstart_tzid.as_deref().unwrap_or("floating"),
        count = occurrences.len(),
        "Computed occurrences"
    );

    Ok(occurrences)
}
