//! Property-based checks for folding, escaping and determinism.

use kalend_rfc::rfc::ical::build::{MAX_LINE_OCTETS, escape_text, fold_line};
use kalend_rfc::rfc::ical::parse::unescape_text;
use kalend_rfc::rfc::ical::{EventRecord, serialize_event};
use proptest::prelude::*;

use super::helpers::{event, physical_lines, unfold};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn folded_lines_fit(line in "\\PC{0,400}") {
        let folded = fold_line(&line);

        prop_assert!(folded.ends_with("\r\n"));
        for (i, physical) in folded.trim_end_matches("\r\n").split("\r\n").enumerate() {
            prop_assert!(physical.len() <= MAX_LINE_OCTETS);
            if i > 0 {
                prop_assert!(physical.starts_with(' '));
            }
        }
        let unfolded = unfold(&folded);
        prop_assert_eq!(unfolded.trim_end_matches("\r\n"), line.as_str());
    }

    #[test]
    fn escape_round_trips(text in "[a-zA-Z0-9 ,;:\\\\\n\u{e9}\u{65e5}]{0,200}") {
        prop_assert_eq!(unescape_text(&escape_text(&text)), text);
    }

    #[test]
    fn serialized_events_are_stable_and_folded(
        summary in "[^\r]{1,300}",
        description in proptest::option::of("\\PC{0,300}"),
    ) {
        prop_assume!(!summary.trim().is_empty());
        let record = EventRecord {
            description,
            ..event("prop@kalend", &summary)
        };

        let first = serialize_event(&record).unwrap();
        let second = serialize_event(&record).unwrap();
        prop_assert_eq!(&first, &second);

        for line in physical_lines(&first) {
            prop_assert!(line.len() <= MAX_LINE_OCTETS);
        }
    }
}
