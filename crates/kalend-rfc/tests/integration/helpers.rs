use kalend_rfc::rfc::ical::{EventRecord, Occurrence};

/// Splits serialized ICS into physical lines without their CRLF.
pub fn physical_lines(ics: &str) -> Vec<&str> {
    ics.split("\r\n").filter(|line| !line.is_empty()).collect()
}

/// Reverses line folding.
pub fn unfold(ics: &str) -> String {
    ics.replace("\r\n ", "")
}

pub fn local_strings(occurrences: &[Occurrence]) -> Vec<String> {
    occurrences.iter().map(ToString::to_string).collect()
}

pub fn utc_strings(occurrences: &[Occurrence]) -> Vec<String> {
    occurrences
        .iter()
        .map(|o| o.utc().format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .collect()
}

/// A valid event with a fixed DTSTAMP.
pub fn event(uid: &str, summary: &str) -> EventRecord {
    EventRecord::new(uid, 1_769_169_600_000_000, summary, "2026-03-02T10:00:00")
}
