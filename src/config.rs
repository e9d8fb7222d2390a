use crate::error::{config_error, AppResult, Error};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::str::FromStr;

/// Default backend API location
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Default port for the web interface
pub const DEFAULT_PORT: u16 = 3000;

/// Secret used to sign session cookies when none is configured
pub const DEFAULT_SESSION_SECRET: &str = "eventsphere_dev_secret";

/// Default location of the TOML overlay
pub const DEFAULT_CONFIG_FILE: &str = "config/eventsphere.toml";

/// Main configuration structure for the front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend API, e.g. `http://localhost:5000/api`
    pub api_base_url: String,
    /// Port the web interface listens on
    pub listen_port: u16,
    /// Secret for signing session cookies
    pub session_secret: String,
    /// Timezone used when displaying event dates
    pub timezone: String,
    /// Request timeout in seconds, 0 disables it
    pub request_timeout_secs: u64,
}

/// Values that may be set from the TOML overlay file
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    api_base_url: Option<String>,
    listen_port: Option<u16>,
    timezone: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            listen_port: DEFAULT_PORT,
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            timezone: "UTC".to_string(),
            request_timeout_secs: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        // The overlay file sits below the environment
        let config_path =
            env::var("EVENTSPHERE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if let Ok(content) = fs::read_to_string(&config_path) {
            config.apply_overlay(&content)?;
        }

        config.apply_env(|var| env::var(var).ok())?;

        // Fail early on a bad timezone rather than on first render
        config.timezone()?;

        Ok(config)
    }

    /// Merge values from a TOML document into this config
    pub fn apply_overlay(&mut self, content: &str) -> AppResult<()> {
        let overlay: ConfigOverlay = toml::from_str(content)?;

        if let Some(url) = overlay.api_base_url {
            self.api_base_url = url;
        }
        if let Some(port) = overlay.listen_port {
            self.listen_port = port;
        }
        if let Some(timezone) = overlay.timezone {
            self.timezone = timezone;
        }
        if let Some(timeout) = overlay.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }

        Ok(())
    }

    /// Override values from environment variables read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(port) = parse_var::<u16>("PORT", lookup("PORT"))? {
            self.listen_port = port;
        }
        if let Some(secret) = lookup("SESSION_SECRET") {
            self.session_secret = secret;
        }
        if let Some(timezone) = lookup("TIMEZONE") {
            self.timezone = timezone;
        }
        let timeout = lookup("REQUEST_TIMEOUT_SECS");
        if let Some(timeout) = parse_var::<u64>("REQUEST_TIMEOUT_SECS", timeout)? {
            self.request_timeout_secs = timeout;
        }

        Ok(())
    }

    /// Parsed display timezone
    pub fn timezone(&self) -> AppResult<Tz> {
        Tz::from_str(&self.timezone)
            .map_err(|_| config_error(&format!("Unknown timezone '{}'", self.timezone)))
    }
}

/// Parse an optional numeric variable, naming it on failure
fn parse_var<T: FromStr>(var: &str, value: Option<String>) -> AppResult<Option<T>> {
    match value {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Environment(format!("Invalid {} format", var))),
        None => Ok(None),
    }
}
