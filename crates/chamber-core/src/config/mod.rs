use anyhow::Result;
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::error::CoreResult;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Calendar arithmetic and listing window settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// IANA zone that stored instants are converted into before any date arithmetic.
    pub timezone: String,
    pub listing_horizon_days: u32,
    pub past_lookback_days: u32,
    pub digest_days: u32,
    pub iteration_cap: u32,
}

impl CalendarConfig {
    /// ## Summary
    /// Resolves the configured calendar timezone.
    ///
    /// ## Errors
    /// Returns an error if the name is not a known IANA zone.
    pub fn tz(&self) -> CoreResult<Tz> {
        crate::time::parse_timezone(&self.timezone)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON export of event records.
    pub path: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `config.toml`, in increasing order of precedence.
    ///
    /// Environment keys use `__` between section and field, so
    /// `CALENDAR__ITERATION_CAP` sets `calendar.iteration_cap`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
    }

    fn load_from(environment: config::Environment) -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "debug")?
            .set_default("calendar.timezone", "UTC")?
            .set_default("calendar.listing_horizon_days", 90)?
            .set_default("calendar.past_lookback_days", 90)?
            .set_default("calendar.digest_days", 14)?
            .set_default("calendar.iteration_cap", 600)?
            .set_default("store.path", "events.json")?
            // Env file
            .add_source(environment)
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(error = %err, "No .env file loaded");
    }

    Settings::load()
}
