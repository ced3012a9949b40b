mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kalend_core::config::load_config;
use kalend_rfc::rfc::ical::{IcsOptions, RecurrenceSpec};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kalend")]
#[command(about = "Expand recurrence rules and export events as iCalendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the occurrences of a recurrence rule, one per line
    Occurrences {
        /// RRULE value, e.g. "FREQ=WEEKLY;BYDAY=MO,WE;COUNT=10"
        #[arg(long)]
        rrule: String,

        /// Local start, e.g. "2026-03-02T10:00:00" or "2026-03-02"
        #[arg(long)]
        dtstart: String,

        /// IANA timezone of the start; omit for floating time
        #[arg(long)]
        tzid: Option<String>,

        /// Maximum number of occurrences (defaults to the configured value)
        #[arg(long)]
        max_count: Option<usize>,

        /// Extra occurrence in the same form as the start (repeatable)
        #[arg(long)]
        rdate: Vec<String>,

        /// Excluded occurrence in the same form as the start (repeatable)
        #[arg(long)]
        exdate: Vec<String>,

        /// Also print each occurrence's UTC instant
        #[arg(long)]
        utc: bool,
    },
    /// Serialize one JSON event record as a calendar
    Event {
        /// JSON file, or "-" for stdin
        input: String,
    },
    /// Serialize JSON calendar metadata and events
    Calendar {
        /// JSON file with "metadata" and "events", or "-" for stdin
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping warn");
    }

    match cli.command {
        Commands::Occurrences {
            rrule,
            dtstart,
            tzid,
            max_count,
            rdate,
            exdate,
            utc,
        } => {
            let spec = RecurrenceSpec {
                rrule,
                dtstart,
                dtstart_tzid: tzid,
                max_count: max_count.unwrap_or(config.recurrence.default_max_count),
                rdate,
                exdate,
            };
            commands::occurrences::run(&spec, utc)
        }
        Commands::Event { input } => {
            let options = IcsOptions::from_config(&config.calendar)?;
            commands::event::run(&input, options)
        }
        Commands::Calendar { input } => {
            let options = IcsOptions::from_config(&config.calendar)?;
            commands::calendar::run(&input, options)
        }
    }
}
