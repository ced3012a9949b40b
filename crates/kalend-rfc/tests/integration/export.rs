//! ICS export of single events and whole calendars.

use kalend_rfc::rfc::ical::build::MAX_LINE_OCTETS;
use kalend_rfc::rfc::ical::parse::unescape_text;
use kalend_rfc::rfc::ical::{
    CalendarMetadata, EventRecord, EventStatus, IcsOptions, IcsSerializer, serialize_calendar,
    serialize_event,
};

use super::helpers::{event, physical_lines, unfold};

#[test]
fn serialization_is_deterministic() {
    let record = EventRecord {
        description: Some("Quarterly planning with the whole team".to_string()),
        status: Some(EventStatus::Tentative),
        rrule: Some("FREQ=MONTHLY;BYDAY=1MO".to_string()),
        ..event("planning@kalend", "Planning")
    };

    let first = serialize_event(&record).unwrap();
    let second = serialize_event(&record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn summary_escaping_round_trips() {
    let summary = "Lunch, drinks; \\ more\nsee you";
    let ics = serialize_event(&event("escape@kalend", summary)).unwrap();
    let unfolded = unfold(&ics);

    let line = unfolded
        .split("\r\n")
        .find(|line| line.starts_with("SUMMARY:"))
        .unwrap();
    assert_eq!(line, "SUMMARY:Lunch\\, drinks\\; \\\\ more\\nsee you");
    assert_eq!(unescape_text(&line["SUMMARY:".len()..]), summary);
}

#[test]
fn long_lines_are_folded() {
    let record = EventRecord {
        description: Some("Ünïcödé text that keeps going and going ".repeat(12)),
        ..event("fold@kalend", &"Long summary ".repeat(10))
    };
    let ics = serialize_event(&record).unwrap();

    for line in physical_lines(&ics) {
        assert!(line.len() <= MAX_LINE_OCTETS, "{line:?}");
    }
    assert!(ics.contains("\r\n "));

    let unfolded = unfold(&ics);
    assert!(unfolded.contains(&format!("SUMMARY:{}\r\n", "Long summary ".repeat(10))));
}

#[test]
fn dtend_and_duration_keep_only_dtend() {
    let record = EventRecord {
        dtend: Some("2026-03-02T11:00:00".to_string()),
        duration: Some("PT2H".to_string()),
        ..event("both@kalend", "Both")
    };
    let ics = serialize_event(&record).unwrap();

    assert!(ics.contains("DTEND:20260302T110000\r\n"));
    assert!(!ics.contains("DURATION"));
}

#[test]
fn floating_times_have_no_zone_or_z() {
    let ics = serialize_event(&event("floating@kalend", "Floating")).unwrap();
    assert!(ics.contains("DTSTART:20260302T100000\r\n"));
}

#[test_log::test]
fn partial_calendar_keeps_valid_events() {
    let events = vec![
        event("one@kalend", "One"),
        event("two@kalend", "Two"),
        EventRecord {
            summary: String::new(),
            ..event("missing@kalend", "ignored")
        },
        event("three@kalend", "Three"),
    ];
    let ics = serialize_calendar(&events, &CalendarMetadata::new("Club")).unwrap();

    assert_eq!(ics.matches("BEGIN:VEVENT\r\n").count(), 3);
    assert_eq!(ics.matches("END:VEVENT\r\n").count(), 3);
    assert_eq!(ics.matches("END:VCALENDAR").count(), 1);
    assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
    assert!(!ics.contains("missing@kalend"));
}

#[test]
fn calendar_from_json() {
    let events: Vec<EventRecord> = serde_json::from_str(
        r#"[
            {"uid":"b","dtstamp":0,"summary":"B","dtstart":"2026-05-02","dtend":"2026-05-03"},
            {"uid":"a","dtstamp":0,"summary":"A","dtstart":"2026-05-01T09:00:00",
             "dtstartTzid":"Eastern Standard Time","duration":"PT45M","sequence":4}
        ]"#,
    )
    .unwrap();
    let metadata: CalendarMetadata = serde_json::from_str(
        r##"{"name":"Imported","timezone":"America/New_York","color":"#00AAFF"}"##,
    )
    .unwrap();

    let ics = serialize_calendar(&events, &metadata).unwrap();

    assert!(ics.contains("DTSTART;TZID=America/New_York:20260501T090000\r\n"));
    assert!(ics.contains("DURATION:PT45M\r\n"));
    assert!(ics.contains("DTSTART;VALUE=DATE:20260502\r\n"));
    assert!(ics.contains("X-WR-TIMEZONE:America/New_York\r\n"));
    assert!(ics.find("UID:a").unwrap() < ics.find("UID:b").unwrap());
}

#[test]
fn custom_options_apply_to_every_output() {
    let serializer = IcsSerializer::new(IcsOptions {
        prodid: "-//Example Corp//Planner 2.1//EN".to_string(),
        refresh_interval: Some("PT12H".parse().unwrap()),
    });

    let single = serializer.serialize_event(&event("x@kalend", "X")).unwrap();
    let feed = serializer
        .serialize_calendar(&[event("x@kalend", "X")], &CalendarMetadata::new("Feed"))
        .unwrap();

    for ics in [single, feed] {
        assert!(ics.contains("PRODID:-//Example Corp//Planner 2.1//EN\r\n"));
        assert!(ics.contains("REFRESH-INTERVAL;VALUE=DURATION:PT12H\r\n"));
        assert!(ics.contains("X-PUBLISHED-TTL:PT12H\r\n"));
    }
}
