//! Wall-clock preservation across daylight-saving transitions.

use chrono::TimeDelta;
use kalend_rfc::rfc::ical::{RecurrenceSpec, compute_occurrences, resolve_local_to_utc};

use super::helpers::{local_strings, utc_strings};

#[test_log::test]
fn weekly_spring_forward_new_york() {
    let spec = RecurrenceSpec::new("FREQ=WEEKLY;COUNT=3", "2026-03-02T10:00:00")
        .with_tzid("America/New_York");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        local_strings(&occurrences),
        [
            "2026-03-02T10:00:00",
            "2026-03-09T10:00:00",
            "2026-03-16T10:00:00"
        ]
    );
    assert_eq!(
        utc_strings(&occurrences),
        [
            "2026-03-02T15:00:00Z",
            "2026-03-09T14:00:00Z",
            "2026-03-16T14:00:00Z"
        ]
    );
    assert_eq!(
        occurrences[1].utc() - occurrences[0].utc(),
        TimeDelta::days(7) - TimeDelta::hours(1)
    );
}

#[test]
fn weekly_fall_back_new_york() {
    let spec = RecurrenceSpec::new("FREQ=WEEKLY;COUNT=2", "2026-10-26T10:00:00")
        .with_tzid("America/New_York");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        local_strings(&occurrences),
        ["2026-10-26T10:00:00", "2026-11-02T10:00:00"]
    );
    assert_eq!(
        occurrences[1].utc() - occurrences[0].utc(),
        TimeDelta::days(7) + TimeDelta::hours(1)
    );
}

#[test]
fn daily_across_european_transition() {
    // Europe switches on 2026-03-29
    let spec = RecurrenceSpec::new("FREQ=DAILY;COUNT=3", "2026-03-28T08:30:00")
        .with_tzid("Europe/Berlin");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        utc_strings(&occurrences),
        [
            "2026-03-28T07:30:00Z",
            "2026-03-29T06:30:00Z",
            "2026-03-30T06:30:00Z"
        ]
    );
}

#[test]
fn monthly_and_yearly_keep_wall_clock() {
    for rule in ["FREQ=MONTHLY;COUNT=12", "FREQ=YEARLY;COUNT=3"] {
        let spec = RecurrenceSpec::new(rule, "2026-01-15T18:45:00").with_tzid("Australia/Sydney");
        for occurrence in compute_occurrences(&spec).unwrap() {
            assert!(
                occurrence.to_string().ends_with("T18:45:00"),
                "{rule}: {occurrence}"
            );
        }
    }
}

#[test]
fn occurrence_in_gap_keeps_wall_clock() {
    // 02:30 does not exist on 2026-03-08 in New York
    let spec = RecurrenceSpec::new("FREQ=DAILY;COUNT=3", "2026-03-07T02:30:00")
        .with_tzid("America/New_York");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        local_strings(&occurrences),
        [
            "2026-03-07T02:30:00",
            "2026-03-08T02:30:00",
            "2026-03-09T02:30:00"
        ]
    );
    assert_eq!(
        utc_strings(&occurrences),
        [
            "2026-03-07T07:30:00Z",
            "2026-03-08T07:30:00Z",
            "2026-03-09T06:30:00Z"
        ]
    );
}

#[test]
fn shared_resolver_matches_expansion() {
    let spec = RecurrenceSpec::new("FREQ=WEEKLY;COUNT=4", "2026-10-19T09:00:00")
        .with_tzid("Europe/London");
    for occurrence in compute_occurrences(&spec).unwrap() {
        let resolved =
            resolve_local_to_utc(&occurrence.to_string(), Some("Europe/London")).unwrap();
        assert_eq!(resolved, occurrence.utc());
    }
}

#[test]
fn gap_shifted_rdate_sorts_by_instant() {
    // 02:30 on 2026-03-08 does not exist in New York and lands at 03:30 EDT
    let spec = RecurrenceSpec::new("FREQ=DAILY;COUNT=2", "2026-03-07T03:15:00")
        .with_tzid("America/New_York")
        .with_rdate("2026-03-08T02:30:00");
    let occurrences = compute_occurrences(&spec).unwrap();

    assert_eq!(
        local_strings(&occurrences),
        [
            "2026-03-07T03:15:00",
            "2026-03-08T03:15:00",
            "2026-03-08T02:30:00"
        ]
    );
    assert_eq!(
        utc_strings(&occurrences),
        [
            "2026-03-07T08:15:00Z",
            "2026-03-08T07:15:00Z",
            "2026-03-08T07:30:00Z"
        ]
    );
}
