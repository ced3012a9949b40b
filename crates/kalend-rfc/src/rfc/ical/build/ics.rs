//! Event and calendar export to ICS text.
//!
//! Records are validated and mapped onto a [`Component`] tree, which the
//! serializer then writes in canonical order.

use kalend_core::config::CalendarConfig;
use kalend_core::constants::PRODID;

use super::serializer::serialize_component;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{
    CalendarMetadata, Component, Duration, EventRecord, LocalDateTime, Parameter, Property,
    RecurrenceId, utc_from_micros,
};
use crate::rfc::ical::expand::TimeZoneResolver;
use crate::rfc::ical::parse::parse_rrule;

const MAX_UID_CHARS: usize = 255;
const MAX_SUMMARY_CHARS: usize = 500;
const MAX_CALENDAR_NAME_CHARS: usize = 100;

/// Calendar-wide output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsOptions {
    /// `PRODID` written on every calendar.
    pub prodid: String,
    /// Suggested subscriber polling interval (RFC 7986 `REFRESH-INTERVAL`).
    pub refresh_interval: Option<Duration>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            prodid: PRODID.to_string(),
            refresh_interval: None,
        }
    }
}

impl IcsOptions {
    /// ## Summary
    /// Builds options from the calendar section of the configuration.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if the refresh interval is not an
    /// RFC 5545 duration.
    pub fn from_config(config: &CalendarConfig) -> RfcResult<Self> {
        let refresh_interval = config
            .refresh_interval
            .as_deref()
            .map(str::parse::<Duration>)
            .transpose()?;

        Ok(Self {
            prodid: config.prodid.clone(),
            refresh_interval,
        })
    }
}

/// Serializes events and calendars with a fixed set of [`IcsOptions`].
#[derive(Debug, Clone, Default)]
pub struct IcsSerializer {
    options: IcsOptions,
}

impl IcsSerializer {
    #[must_use]
    pub const fn new(options: IcsOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &IcsOptions {
        &self.options
    }

    /// ## Summary
    /// Serializes one event inside a minimal VCALENDAR named after it.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if a required field is missing or
    /// any field of the event is invalid.
    pub fn serialize_event(&self, event: &EventRecord) -> RfcResult<String> {
        let mut resolver = TimeZoneResolver::new();
        let vevent = event_component(event, &mut resolver)?;

        let mut calendar = self.calendar_component();
        calendar.add_property(Property::text("NAME", &event.summary));
        calendar.add_property(Property::text("X-WR-CALNAME", &event.summary));
        calendar.add_child(vevent);

        Ok(serialize_component(&calendar))
    }

    /// ## Summary
    /// Serializes a whole calendar feed.
    ///
    /// Invalid events are skipped and logged; the feed is still produced
    /// from the remaining ones.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if the calendar metadata is invalid.
    pub fn serialize_calendar(
        &self,
        events: &[EventRecord],
        metadata: &CalendarMetadata,
    ) -> RfcResult<String> {
        let mut resolver = TimeZoneResolver::new();
        let mut calendar = self.calendar_component();
        add_metadata(&mut calendar, metadata, &mut resolver)?;

        let mut skipped = 0_usize;
        for event in events {
            match event_component(event, &mut resolver) {
                Ok(vevent) => calendar.add_child(vevent),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(uid = %event.uid, error = %e, "Skipping invalid event");
                }
            }
        }

        tracing::debug!(
            calendar = %metadata.name,
            events = calendar.children.len(),
            skipped,
            "Serialized calendar"
        );

        Ok(serialize_component(&calendar))
    }

    fn calendar_component(&self) -> Component {
        let mut calendar = Component::calendar();
        calendar.add_property(Property::text("VERSION", "2.0"));
        calendar.add_property(Property::text("PRODID", &self.options.prodid));
        calendar.add_property(Property::text("CALSCALE", "GREGORIAN"));
        calendar.add_property(Property::text("METHOD", "PUBLISH"));

        if let Some(interval) = self.options.refresh_interval {
            calendar.add_property(
                Property::duration("REFRESH-INTERVAL", interval)
                    .with_param(Parameter::value_type("DURATION")),
            );
            calendar.add_property(Property::duration("X-PUBLISHED-TTL", interval));
        }

        calendar
    }
}

/// ## Summary
/// Serializes one event with default options.
///
/// ## Errors
/// See [`IcsSerializer::serialize_event`].
pub fn serialize_event(event: &EventRecord) -> RfcResult<String> {
    IcsSerializer::default().serialize_event(event)
}

/// ## Summary
/// Serializes a calendar feed with default options.
///
/// ## Errors
/// See [`IcsSerializer::serialize_calendar`].
pub fn serialize_calendar(events: &[EventRecord], metadata: &CalendarMetadata) -> RfcResult<String> {
    IcsSerializer::default().serialize_calendar(events, metadata)
}

fn invalid(message: impl Into<String>) -> RfcError {
    RfcError::ValidationError(message.into())
}

/// Returns the value unless it is absent or blank.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn check_length(field: &str, value: &str, max: usize) -> RfcResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(invalid(format!(
            "{field} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

fn resolve_tzid(tzid: &str, resolver: &mut TimeZoneResolver) -> RfcResult<String> {
    resolver
        .iana_name(tzid)
        .map_err(|e| invalid(format!("invalid time zone: {e}")))
}

fn parse_local(field: &str, value: &str) -> RfcResult<LocalDateTime> {
    value
        .parse()
        .map_err(|e| invalid(format!("{field}: {e}")))
}

fn parse_instant(field: &str, micros: i64) -> RfcResult<chrono::DateTime<chrono::Utc>> {
    utc_from_micros(micros).map_err(|e| invalid(format!("{field}: {e}")))
}

fn parse_local_list(
    field: &str,
    values: &[String],
    dtstart: LocalDateTime,
) -> RfcResult<Vec<LocalDateTime>> {
    values
        .iter()
        .map(|value| {
            let parsed = parse_local(field, value)?;
            if parsed.is_all_day() == dtstart.is_all_day() {
                Ok(parsed)
            } else {
                Err(invalid(format!(
                    "{field} value {value:?} must use the same DATE or DATE-TIME form as DTSTART"
                )))
            }
        })
        .collect()
}

/// Validates an event and maps it onto a VEVENT.
fn event_component(event: &EventRecord, resolver: &mut TimeZoneResolver) -> RfcResult<Component> {
    check_length("UID", &event.uid, MAX_UID_CHARS)?;
    check_length("SUMMARY", &event.summary, MAX_SUMMARY_CHARS)?;
    if event.dtstart.trim().is_empty() {
        return Err(invalid("DTSTART is required"));
    }

    let dtstamp = parse_instant("DTSTAMP", event.dtstamp)?;
    let dtstart = parse_local("DTSTART", &event.dtstart)?;
    let start_tzid = present(event.dtstart_tzid.as_ref())
        .map(|tzid| resolve_tzid(tzid, resolver))
        .transpose()?;

    let mut vevent = Component::event();
    vevent.add_property(Property::text("UID", &event.uid));
    vevent.add_property(Property::utc("DTSTAMP", dtstamp));
    vevent.add_property(Property::local(
        "DTSTART",
        vec![dtstart],
        start_tzid.as_deref(),
    ));

    if let Some(dtend) = present(event.dtend.as_ref()) {
        let dtend = parse_local("DTEND", dtend)?;
        let end_tzid = match present(event.dtend_tzid.as_ref()) {
            Some(tzid) => Some(resolve_tzid(tzid, resolver)?),
            None => start_tzid.clone(),
        };
        vevent.add_property(Property::local("DTEND", vec![dtend], end_tzid.as_deref()));
    } else if let Some(duration) = present(event.duration.as_ref()) {
        let duration: Duration = duration
            .parse()
            .map_err(|e| invalid(format!("DURATION: {e}")))?;
        vevent.add_property(Property::duration("DURATION", duration));
    }

    if let Some(rrule) = present(event.rrule.as_ref()) {
        parse_rrule(rrule).map_err(|e| invalid(format!("RRULE: {e}")))?;
        let rrule = rrule.trim();
        let body = rrule
            .get(..6)
            .filter(|prefix| prefix.eq_ignore_ascii_case("RRULE:"))
            .map_or(rrule, |_| &rrule[6..]);
        vevent.add_property(Property::recur("RRULE", body));
    }

    for (name, values) in [("RDATE", &event.rdate), ("EXDATE", &event.exdate)] {
        let parsed = parse_local_list(name, values, dtstart)?;
        if !parsed.is_empty() {
            vevent.add_property(Property::local(name, parsed, start_tzid.as_deref()));
        }
    }

    if let Some(RecurrenceId::Timestamp(micros)) = event.recurrence_id {
        vevent.add_property(Property::utc(
            "RECURRENCE-ID",
            parse_instant("RECURRENCE-ID", micros)?,
        ));
    }

    vevent.add_optional(present(event.description.as_ref()).map(|d| Property::text("DESCRIPTION", d)));
    vevent.add_optional(present(event.location.as_ref()).map(|l| Property::text("LOCATION", l)));
    vevent.add_optional(event.status.map(|s| Property::text("STATUS", s.as_str())));
    vevent.add_optional(present(event.url.as_ref()).map(|u| Property::uri("URL", u)));
    vevent.add_optional(present(event.image_uri.as_ref()).map(|uri| {
        Property::uri("IMAGE", uri).with_param(Parameter::value_type("URI"))
    }));

    if let Some(created) = event.created {
        vevent.add_property(Property::utc("CREATED", parse_instant("CREATED", created)?));
    }
    if let Some(modified) = event.last_modified {
        vevent.add_property(Property::utc(
            "LAST-MODIFIED",
            parse_instant("LAST-MODIFIED", modified)?,
        ));
    }
    if let Some(sequence) = event.sequence {
        vevent.add_property(Property::integer("SEQUENCE", i64::from(sequence)));
    }

    Ok(vevent)
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validates calendar metadata and adds its properties.
fn add_metadata(
    calendar: &mut Component,
    metadata: &CalendarMetadata,
    resolver: &mut TimeZoneResolver,
) -> RfcResult<()> {
    check_length("calendar name", &metadata.name, MAX_CALENDAR_NAME_CHARS)?;
    calendar.add_property(Property::text("NAME", &metadata.name));
    calendar.add_property(Property::text("X-WR-CALNAME", &metadata.name));

    if let Some(description) = present(metadata.description.as_ref()) {
        calendar.add_property(Property::text("DESCRIPTION", description));
        calendar.add_property(Property::text("X-WR-CALDESC", description));
    }

    if let Some(timezone) = present(metadata.timezone.as_ref()) {
        let timezone = resolve_tzid(timezone, resolver)?;
        calendar.add_property(Property::text("X-WR-TIMEZONE", timezone));
    }

    if let Some(color) = present(metadata.color.as_ref()) {
        if !is_hex_color(color) {
            return Err(invalid(format!(
                "calendar color must look like #RRGGBB, got {color:?}"
            )));
        }
        calendar.add_property(Property::text("COLOR", color));
    }

    calendar.add_optional(present(metadata.url.as_ref()).map(|u| Property::uri("URL", u)));

    Ok(())
}
