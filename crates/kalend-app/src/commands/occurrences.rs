use std::io::Write;

use anyhow::Result;
use kalend_rfc::rfc::ical::core::format_utc;
use kalend_rfc::rfc::ical::{Occurrence, RecurrenceSpec, compute_occurrences};

pub fn run(spec: &RecurrenceSpec, utc: bool) -> Result<()> {
    let occurrences = compute_occurrences(spec)?;

    let mut stdout = std::io::stdout().lock();
    for line in render(&occurrences, utc) {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn render(occurrences: &[Occurrence], utc: bool) -> Vec<String> {
    occurrences
        .iter()
        .map(|occurrence| {
            if utc {
                format!("{occurrence}\t{}", format_utc(&occurrence.utc()))
            } else {
                occurrence.to_string()
            }
        })
        .collect()
}
