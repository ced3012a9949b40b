use anyhow::{Context, Result};
use kalend_rfc::rfc::ical::{CalendarMetadata, EventRecord, IcsOptions, IcsSerializer};
use serde::Deserialize;

use super::{read_input, write_ics};

#[derive(Debug, Deserialize)]
struct CalendarInput {
    metadata: CalendarMetadata,
    #[serde(default)]
    events: Vec<EventRecord>,
}

pub fn run(input: &str, options: IcsOptions) -> Result<()> {
    let ics = render(&read_input(input)?, options)?;
    write_ics(&ics)
}

fn render(json: &str, options: IcsOptions) -> Result<String> {
    let input: CalendarInput = serde_json::from_str(json).context("Invalid calendar JSON")?;

    Ok(IcsSerializer::new(options).serialize_calendar(&input.events, &input.metadata)?)
}
