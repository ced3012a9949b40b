//! Timezone resolution and UTC conversion for local date-times.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::RfcResult;
use crate::rfc::ical::core::LocalDateTime;

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

/// Resolver for timezone identifiers.
///
/// Maintains a cache of resolved timezones keyed by the TZID as given.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// IANA names are tried as written; anything else goes through
    /// normalization (vendor prefixes, Windows names, IANA aliases).
    ///
    /// ## Errors
    ///
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let tz = Tz::from_str(tzid)
            .or_else(|_e| Tz::from_str(&normalize_tzid(tzid)))
            .map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))?;

        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }

    /// ## Summary
    /// Returns the IANA name to write for a TZID.
    ///
    /// Valid IANA names are kept as written so output matches input;
    /// normalized identifiers are replaced by the zone they resolve to.
    ///
    /// ## Errors
    ///
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    pub fn iana_name(&mut self, tzid: &str) -> Result<String, ConversionError> {
        let tz = self.resolve(tzid)?;
        if Tz::from_str(tzid).is_ok() {
            Ok(tzid.to_string())
        } else {
            Ok(tz.name().to_string())
        }
    }
}

/// Normalizes common CalDAV/iCalendar timezone identifiers to IANA names.
///
/// Uses ICU4X for Windows timezone ID mapping and IANA canonicalization.
fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    // Windows names first (Outlook exports "Eastern Standard Time" etc.)
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Aliases such as Asia/Calcutta -> Asia/Kolkata
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Converts a local datetime to UTC using the specified timezone.
///
/// Ambiguous times (DST fold) resolve to the earlier instant.
///
/// ## Errors
///
/// Returns an error if:
/// - The timezone cannot be resolved
/// - The datetime is non-existent (DST gap)
///
/// ## Side Effects
///
/// Updates the timezone resolver's cache if a new timezone is resolved.
pub fn convert_to_utc(
    local_time: NaiveDateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    let tz = resolver.resolve(tzid)?;

    match tz.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {tzid}"
        ))),
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _later) => Ok(earlier.with_timezone(&Utc)),
    }
}

/// ## Summary
/// Converts a local datetime to UTC, with fallback handling for DST gaps.
///
/// This is a lenient version of `convert_to_utc` that shifts non-existent
/// times forward by one hour instead of returning an error.
///
/// ## Errors
///
/// Returns an error if the timezone cannot be resolved, or if the shifted
/// time still falls in a gap.
///
/// ## Side Effects
///
/// Updates the timezone resolver's cache if a new timezone is resolved.
pub fn convert_to_utc_lenient(
    local_time: NaiveDateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    match convert_to_utc(local_time, tzid, resolver) {
        Err(ConversionError::NonExistentTime(_)) => {
            let shifted = local_time + chrono::Duration::hours(1);
            convert_to_utc(shifted, tzid, resolver)
        }
        other => other,
    }
}

/// ## Summary
/// Resolves a local ISO-8601 value in `tzid` to its UTC instant.
///
/// Without a TZID the value is floating and maps 1:1 onto UTC. DST gaps
/// and folds follow [`convert_to_utc_lenient`].
///
/// ## Errors
///
/// Returns `RfcError::ValidationError` for a malformed local value and
/// `RfcError::Timezone` for an unknown zone or unresolvable gap.
pub fn resolve_local_to_utc(local: &str, tzid: Option<&str>) -> RfcResult<DateTime<Utc>> {
    let local: LocalDateTime = local.parse()?;
    match tzid {
        None => Ok(local.naive().and_utc()),
        Some(tzid) => {
            let mut resolver = TimeZoneResolver::new();
            Ok(convert_to_utc_lenient(local.naive(), tzid, &mut resolver)?)
        }
    }
}
