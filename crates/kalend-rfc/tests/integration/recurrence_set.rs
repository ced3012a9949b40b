//! Set algebra and validation of recurrence inputs.

use kalend_rfc::error::RfcError;
use kalend_rfc::rfc::ical::{RRuleError, RecurrenceSpec, compute_occurrences, validate_rrule};

use super::helpers::local_strings;

#[test]
fn union_minus_exceptions_sorted() {
    let spec = RecurrenceSpec::new("FREQ=WEEKLY;BYDAY=TU,TH;COUNT=6", "2026-04-07T19:00:00")
        .with_tzid("Europe/Madrid")
        .with_rdate("2026-04-11T19:00:00")
        .with_rdate("2026-04-09T19:00:00")
        .with_rdate("2026-04-04T19:00:00")
        .with_exdate("2026-04-14T19:00:00")
        .with_exdate("2026-04-11T19:00:00");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        local_strings(&occurrences),
        [
            "2026-04-04T19:00:00",
            "2026-04-07T19:00:00",
            "2026-04-09T19:00:00",
            "2026-04-16T19:00:00",
            "2026-04-21T19:00:00",
            "2026-04-23T19:00:00"
        ]
    );

    let mut sorted = occurrences.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, occurrences);
}

#[test]
fn exdate_matches_normalized_wall_clock() {
    let spec = RecurrenceSpec::new("FREQ=DAILY;COUNT=3", "2026-06-01T07:00:00")
        .with_exdate("20260602T070000")
        .with_exdate("2026-06-03T07:00:00.000");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(local_strings(&occurrences), ["2026-06-01T07:00:00"]);
}

#[test]
fn exdate_with_different_time_is_ignored() {
    let spec = RecurrenceSpec::new("FREQ=DAILY;COUNT=2", "2026-06-01T07:00:00")
        .with_exdate("2026-06-02T08:00:00");
    assert_eq!(compute_occurrences(&spec).unwrap().len(), 2);
}

#[test]
fn max_count_applies_after_merge() {
    let spec = RecurrenceSpec::new("FREQ=DAILY", "2026-06-10T12:00:00")
        .with_rdate("2026-06-01T12:00:00")
        .with_exdate("2026-06-11T12:00:00")
        .with_max_count(3);
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        local_strings(&occurrences),
        [
            "2026-06-01T12:00:00",
            "2026-06-10T12:00:00",
            "2026-06-12T12:00:00"
        ]
    );
}

#[test]
fn date_only_series() {
    let spec = RecurrenceSpec::new("FREQ=YEARLY;COUNT=3", "2026-07-04")
        .with_tzid("America/Chicago")
        .with_exdate("2027-07-04");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(local_strings(&occurrences), ["2026-07-04", "2028-07-04"]);
}

#[test]
fn validate_rrule_rejections() {
    let rejected = [
        "",
        "INTERVAL=2",
        "FREQ=HOURLY",
        "FREQ=WEEKLY;INTERVAL=0",
        "FREQ=WEEKLY;INTERVAL=1000",
        "FREQ=DAILY;COUNT=5;UNTIL=20261231T000000Z",
        "FREQ=WEEKLY;BYDAY=XX",
        "FREQ=MONTHLY;BYMONTHDAY=32",
        "FREQ=MONTHLY;BYMONTHDAY=0",
        "FREQ=MONTHLY;BYMONTHDAY=-32",
    ];
    for rule in rejected {
        assert!(validate_rrule(rule).is_err(), "{rule:?} should be rejected");
    }

    assert_eq!(
        validate_rrule("FREQ=MINUTELY"),
        Err(RRuleError::UnsupportedFrequency("MINUTELY".to_string()))
    );
    assert!(validate_rrule("FREQ=WEEKLY;INTERVAL=999;BYDAY=MO,-1FR;COUNT=1").is_ok());
    assert!(validate_rrule("FREQ=MONTHLY;BYMONTHDAY=-31,31;BYSETPOS=-366,366").is_ok());
}

#[test]
fn invalid_spec_is_a_validation_error() {
    let spec = RecurrenceSpec::new("FREQ=DAILY;COUNT=0", "2026-01-01T00:00:00");
    let err = compute_occurrences(&spec).unwrap_err();

    assert!(matches!(err, RfcError::RRule(RRuleError::InvalidCount(_))));
    assert!(err.is_validation());
    assert!(err.to_string().contains("COUNT"));
}

#[test]
fn offset_dtstart_rejected() {
    let spec = RecurrenceSpec::new("FREQ=DAILY", "2026-01-01T00:00:00Z");
    assert!(compute_occurrences(&spec).unwrap_err().is_validation());
}
