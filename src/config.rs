/// Dashboard configuration loader - parses wqdash.toml
///
/// Keeps the API origin, timeouts and station picker contents out of the
/// code so the client can be pointed at a different backend without
/// recompiling. Values from the environment (including a `.env` file) take
/// precedence over the file.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::stations;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "wqdash.toml";

pub const ENV_BASE_URL: &str = "WQDASH_BASE_URL";
pub const ENV_MAP_URL: &str = "WQDASH_MAP_URL";
pub const ENV_TIMEOUT_SECS: &str = "WQDASH_TIMEOUT_SECS";

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Client configuration, as read from wqdash.toml.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Origin of the dashboard API, e.g. `http://192.168.29.123:8000`.
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout_secs: u64,

    /// Station selected when the forecast and satellite screens mount.
    pub default_station: String,

    /// Full URL of the map station listing. The map panel is disabled
    /// when unset.
    pub map_data_url: Option<String>,

    /// Replaces the built-in station catalog in the picker.
    pub stations: Option<Vec<String>>,

    /// Worker threads used for background fetches.
    pub fetch_workers: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            default_station: stations::DEFAULT_STATION.to_string(),
            map_data_url: None,
            stations: None,
            fetch_workers: 2,
        }
    }
}

impl DashboardConfig {
    /// Parses configuration from TOML text and validates it.
    pub fn from_toml_str(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &display)
    }

    /// Loads configuration the way the binary does: `.env` first, then the
    /// file at `path` (falling back to defaults if it does not exist), then
    /// environment overrides.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            Self::load(path)?
        } else if explicit {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
            });
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies `WQDASH_*` overrides using `lookup` to read variables, then
    /// re-validates.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(url) = lookup(ENV_MAP_URL) {
            self.map_data_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        self.validate()
    }

    /// Checks the values the client cannot work without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be greater than 0".into()));
        }
        if self.default_station.trim().is_empty() {
            return Err(ConfigError::Invalid("default_station must not be empty".into()));
        }
        if self.fetch_workers == 0 {
            return Err(ConfigError::Invalid("fetch_workers must be at least 1".into()));
        }
        if let Some(list) = &self.stations {
            if list.is_empty() || list.iter().any(|s| s.trim().is_empty()) {
                return Err(ConfigError::Invalid("stations must be a non-empty list of ids".into()));
            }
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for path joining.
    pub fn api_origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Station ids offered in the picker: the configured list, or the
    /// built-in catalog.
    pub fn station_ids(&self) -> Vec<String> {
        match &self.stations {
            Some(list) => list.clone(),
            None => stations::all_station_ids(),
        }
    }
}
