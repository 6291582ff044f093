use dotenv::dotenv;
use renewables_core::{ProjectType, StoreError, ViewMode};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "renewables.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runtime settings resolved from `.env`, the environment and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub initial_type: Option<ProjectType>,
    pub initial_view: ViewMode,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            initial_type: None,
            initial_view: ViewMode::Map,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_url = get("API_URL").unwrap_or(defaults.api_url);

        let timeout = match get("API_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => defaults.timeout,
        };

        // "all" is accepted as an explicit spelling of no filter
        let initial_type = match get("PROJECT_TYPE") {
            Some(raw) if raw.trim().eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(raw.parse::<ProjectType>()?),
            None => None,
        };

        let initial_view = match get("VIEW_MODE") {
            Some(raw) => raw.parse::<ViewMode>()?,
            None => defaults.initial_view,
        };

        let log_file = get("LOG_FILE").map_or(defaults.log_file, PathBuf::from);
        let debug = get("DEBUG").is_some_and(|value| {
            let value = value.trim();
            value == "1" || value.eq_ignore_ascii_case("true")
        });

        Ok(Self {
            api_url: api_url.trim().to_string(),
            timeout,
            initial_type,
            initial_view,
            log_file,
            debug,
        })
    }
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = AppConfig::from_lookup(|key| env::var(key).ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("API_URL", "http://api.example:9000/api"),
            ("API_TIMEOUT_SECS", "3"),
            ("PROJECT_TYPE", "Wind"),
            ("VIEW_MODE", "list"),
            ("LOG_FILE", "/tmp/renewables-test.log"),
            ("DEBUG", "1"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://api.example:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.initial_type, Some(ProjectType::Wind));
        assert_eq!(config.initial_view, ViewMode::List);
        assert_eq!(config.log_file, PathBuf::from("/tmp/renewables-test.log"));
        assert!(config.debug);
    }

    #[test]
    fn debug_only_for_one_or_true() {
        for (raw, expected) in [
            ("1", true),
            ("true", true),
            ("TRUE", true),
            ("false", false),
            ("0", false),
            ("no", false),
        ] {
            let config = AppConfig::from_lookup(lookup(&[("DEBUG", raw)])).unwrap();
            assert_eq!(config.debug, expected, "DEBUG={raw}");
        }
    }

    #[test]
    fn all_means_no_filter() {
        let config = AppConfig::from_lookup(lookup(&[("PROJECT_TYPE", "ALL")])).unwrap();
        assert_eq!(config.initial_type, None);
    }

    #[test]
    fn rejects_unknown_view_mode() {
        let result = AppConfig::from_lookup(lookup(&[("VIEW_MODE", "satellite")]));
        assert!(matches!(
            result,
            Err(ConfigError::Store(StoreError::InvalidViewMode(_)))
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = AppConfig::from_lookup(lookup(&[("API_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }
}
