use std::{env, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::info;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_SESSION_PATH: &str = "data/session.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Zone used to read `datetime-local` input and to render timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
    #[default]
    Local,
    Utc,
}

impl FromStr for TimeZoneMode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(TimeZoneMode::Local),
            "utc" => Ok(TimeZoneMode::Utc),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub request_timeout: Duration,
    pub time_zone: TimeZoneMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            time_zone: TimeZoneMode::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let api_base_url = lookup("APP_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                info!("APP_API_BASE_URL not set, using default: {DEFAULT_API_BASE_URL}");
                defaults.api_base_url
            });
        let session_path = lookup("APP_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_path);

        Ok(Self {
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            api_base_url,
            session_path,
            request_timeout: parse_var(&lookup, "APP_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            time_zone: parse_var(&lookup, "APP_TIMEZONE")?.unwrap_or(defaults.time_zone),
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_zone_mode_parses_case_insensitively() {
        assert_eq!("UTC".parse::<TimeZoneMode>(), Ok(TimeZoneMode::Utc));
        assert_eq!(" local ".parse::<TimeZoneMode>(), Ok(TimeZoneMode::Local));
        assert!("mars".parse::<TimeZoneMode>().is_err());
    }

    #[test]
    fn defaults_point_at_local_api() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.time_zone, TimeZoneMode::Local);
    }

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.session_path, PathBuf::from("data/session.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.time_zone, TimeZoneMode::Local);
    }

    #[test]
    fn set_keys_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("APP_API_BASE_URL", "http://api.internal:8000/"),
            ("APP_SESSION_PATH", "/tmp/session.json"),
            ("APP_REQUEST_TIMEOUT_SECS", " 5 "),
            ("APP_TIMEZONE", "utc"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.api_base_url, "http://api.internal:8000");
        assert_eq!(config.session_path, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.time_zone, TimeZoneMode::Utc);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("APP_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "APP_REQUEST_TIMEOUT_SECS", ref value }
                if value == "soon"
        ));

        let err = Config::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

        let err = Config::from_lookup(lookup_from(&[("APP_TIMEZONE", "mars")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "APP_TIMEZONE", .. }));
    }
}
