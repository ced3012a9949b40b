use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_OCCURRENCES, PRODID};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub recurrence: RecurrenceConfig,
    pub logging: LoggingConfig,
}

/// Settings applied to every serialized calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub prodid: String,
    /// Suggested polling interval for subscribers, as an RFC 5545 duration.
    pub refresh_interval: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceConfig {
    pub default_max_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `config.toml` into a `Settings`.
    ///
    /// Environment variables use the `KALEND_` prefix and `__` between
    /// sections, e.g. `KALEND_LOGGING__LEVEL=info`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> CoreResult<Self> {
        let settings = Config::builder()
            .set_default("calendar.prodid", PRODID)?
            .set_default(
                "recurrence.default_max_count",
                u64::try_from(DEFAULT_MAX_OCCURRENCES).unwrap_or(u64::MAX),
            )?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("KALEND")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks invariants that deserialization alone cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.calendar.prodid.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "calendar.prodid must not be empty".to_string(),
            ));
        }
        if self
            .calendar
            .refresh_interval
            .as_deref()
            .is_some_and(|interval| !interval.starts_with('P') && !interval.starts_with("-P"))
        {
            return Err(CoreError::ValidationError(
                "calendar.refresh_interval must be an RFC 5545 duration".to_string(),
            ));
        }
        if self.recurrence.default_max_count == 0 {
            return Err(CoreError::ValidationError(
                "recurrence.default_max_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
