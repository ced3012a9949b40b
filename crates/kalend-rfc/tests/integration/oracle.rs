//! Cross-checks expansion against the `rrule` crate.
//!
//! Only rules whose DTSTART matches the pattern are compared; the `rrule`
//! crate drops a non-matching DTSTART while this engine always keeps it.

use chrono::Utc;
use kalend_rfc::rfc::ical::{RecurrenceSpec, compute_occurrences};

use super::helpers::{local_strings, utc_strings};

const CASES: &[(&str, &str, &str)] = &[
    ("FREQ=DAILY;INTERVAL=3;COUNT=20", "2026-03-01T09:00:00", "America/New_York"),
    ("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=30", "2026-03-02T10:00:00", "America/New_York"),
    ("FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH;COUNT=25", "2026-03-03T08:00:00", "Australia/Sydney"),
    ("FREQ=MONTHLY;COUNT=12", "2026-01-31T07:15:00", "Europe/Berlin"),
    ("FREQ=MONTHLY;BYMONTHDAY=-1;COUNT=24", "2026-01-31T18:00:00", "Europe/Berlin"),
    ("FREQ=MONTHLY;BYDAY=2TU;COUNT=18", "2026-01-13T18:30:00", "America/Los_Angeles"),
    (
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1;COUNT=12",
        "2026-01-30T17:00:00",
        "Europe/London",
    ),
    ("FREQ=YEARLY;BYMONTH=11;BYDAY=4TH;COUNT=10", "2026-11-26T15:00:00", "America/New_York"),
    ("FREQ=YEARLY;BYMONTH=3,10;BYDAY=-1SU;COUNT=8", "2026-03-29T12:00:00", "Europe/Paris"),
    (
        "FREQ=DAILY;BYMONTH=2;BYMONTHDAY=29;COUNT=4",
        "2024-02-29T09:00:00",
        "Europe/Berlin",
    ),
];

fn oracle(rule: &str, dtstart: &str, tzid: &str) -> (Vec<String>, Vec<String>) {
    let basic = dtstart.replace(['-', ':'], "");
    let set: rrule::RRuleSet = format!("DTSTART;TZID={tzid}:{basic}\nRRULE:{rule}")
        .parse()
        .unwrap();
    let dates = set.all(500).dates;

    let local = dates
        .iter()
        .map(|d| d.naive_local().format("%Y-%m-%dT%H:%M:%S").to_string())
        .collect();
    let utc = dates
        .iter()
        .map(|d| {
            d.with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string()
        })
        .collect();
    (local, utc)
}

#[test]
fn expansion_matches_rrule_crate() {
    for (rule, dtstart, tzid) in CASES {
        let spec = RecurrenceSpec::new(*rule, *dtstart).with_tzid(*tzid);
        let occurrences = compute_occurrences(&spec).unwrap();
        let (local, utc) = oracle(rule, dtstart, tzid);

        assert_eq!(local_strings(&occurrences), local, "{rule} from {dtstart}");
        assert_eq!(utc_strings(&occurrences), utc, "{rule} from {dtstart} ({tzid})");
    }
}
