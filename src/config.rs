use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Optional settings file, overridden by environment variables
pub const SETTINGS_FILE: &str = "config/settings.toml";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default timezone for interpreting extracted local times
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

/// Main configuration structure for the web app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Address to bind the HTTP server to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// IANA timezone used for calendar links
    pub timezone: String,
    /// Locale for user-facing messages
    pub locale: String,
    /// Endpoint used to look up the route origin, if any
    pub geolocation_url: Option<String>,
    /// How long to wait for the origin lookup
    pub geolocation_timeout_secs: u64,
}

/// Values that may come from the settings file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    gemini_model: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    timezone: Option<String>,
    locale: Option<String>,
    geolocation_url: Option<String>,
    geolocation_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: "ja".to_string(),
            geolocation_url: None,
            geolocation_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment and the settings file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        if Path::new(SETTINGS_FILE).exists() {
            let content = fs::read_to_string(SETTINGS_FILE)?;
            config.apply_file(&content)?;
        }

        // Required environment variables
        config.gemini_api_key =
            env::var("GEMINI_API_KEY").map_err(|_| env_error("GEMINI_API_KEY"))?;

        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse::<u16>()
                .map_err(|_| config_error("Invalid PORT format"))?;
        }
        if let Ok(timezone) = env::var("TIMEZONE") {
            config.timezone = timezone;
        }
        if let Ok(locale) = env::var("APP_LOCALE") {
            config.locale = locale;
        }
        if let Ok(url) = env::var("GEOLOCATION_URL") {
            config.geolocation_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Ok(secs) = env::var("GEOLOCATION_TIMEOUT_SECS") {
            config.geolocation_timeout_secs = secs
                .parse::<u64>()
                .map_err(|_| config_error("Invalid GEOLOCATION_TIMEOUT_SECS format"))?;
        }

        // Reject an unknown timezone at startup
        config.tz()?;

        Ok(config)
    }

    /// Merge values from settings file content
    fn apply_file(&mut self, content: &str) -> AppResult<()> {
        let file: FileSettings = toml::from_str(content)?;

        if let Some(model) = file.gemini_model {
            self.gemini_model = model;
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(timezone) = file.timezone {
            self.timezone = timezone;
        }
        if let Some(locale) = file.locale {
            self.locale = locale;
        }
        if file.geolocation_url.is_some() {
            self.geolocation_url = file.geolocation_url;
        }
        if let Some(secs) = file.geolocation_timeout_secs {
            self.geolocation_timeout_secs = secs;
        }
        Ok(())
    }

    /// Parsed timezone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Upper bound on the origin lookup
    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Tokyo);
        assert_eq!(config.port, 3000);
        assert_eq!(config.geolocation_timeout(), Duration::from_secs(5));
        assert!(config.geolocation_url.is_none());
    }

    #[test]
    fn test_apply_file() {
        let mut config = Config::default();
        config
            .apply_file(
                r#"
                port = 8080
                timezone = "UTC"
                geolocation_url = "http://localhost:9000/where"
                "#,
            )
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
        assert_eq!(
            config.geolocation_url.as_deref(),
            Some("http://localhost:9000/where")
        );
        // Untouched keys keep their defaults
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_apply_file_rejects_bad_toml() {
        let mut config = Config::default();
        assert!(config.apply_file("port = \"not a number\"").is_err());
    }

    #[test]
    fn test_unknown_timezone() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(config.tz().is_err());
    }
}
