pub mod calendar;
pub mod event;
pub mod occurrences;

use std::io::{Read, Write};

use anyhow::{Context, Result};

/// Reads a whole input file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

/// Writes serialized ICS to stdout as-is; lines already end in CRLF.
pub fn write_ics(ics: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(ics.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
