use anyhow::{Context, Result};
use kalend_rfc::rfc::ical::{EventRecord, IcsOptions, IcsSerializer};

use super::{read_input, write_ics};

pub fn run(input: &str, options: IcsOptions) -> Result<()> {
    let ics = render(&read_input(input)?, options)?;
    write_ics(&ics)
}

fn render(json: &str, options: IcsOptions) -> Result<String> {
    let event: EventRecord = serde_json::from_str(json).context("Invalid event JSON")?;
    tracing::debug!(uid = %event.uid, "Serializing event");

    Ok(IcsSerializer::new(options).serialize_event(&event)?)
}
