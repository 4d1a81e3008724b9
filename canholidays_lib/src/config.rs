//! Runtime settings, read from `CANHOLIDAYS_*` environment variables.

use std::time::Duration;

use crate::error::ConfigError;
use crate::province::{self, Province};

pub const ENV_BASE_URL: &str = "CANHOLIDAYS_API_BASE_URL";
pub const ENV_DEBOUNCE_MS: &str = "CANHOLIDAYS_DEBOUNCE_MS";
pub const ENV_PROVINCE_DELAY_MS: &str = "CANHOLIDAYS_PROVINCE_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "CANHOLIDAYS_TIMEOUT_SECS";
pub const ENV_YEAR: &str = "CANHOLIDAYS_YEAR";
pub const ENV_PROVINCE: &str = "CANHOLIDAYS_PROVINCE";

const DEFAULT_BASE_URL: &str = "https://date.nager.at";
const DEFAULT_DEBOUNCE_MS: u64 = 1000;
const DEFAULT_PROVINCE_DELAY_MS: u64 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_YEAR: &str = "2025";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// Quiet period before a typed year is fetched.
    pub debounce: Duration,
    /// Minimum time a province change shows as loading. Zero disables it.
    pub province_delay: Duration,
    pub request_timeout: Duration,
    pub initial_year: String,
    pub initial_province: &'static Province,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            province_delay: Duration::from_millis(DEFAULT_PROVINCE_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            initial_year: DEFAULT_YEAR.to_string(),
            initial_province: province::default_province(),
        }
    }
}

impl Config {
    /// Reads the process environment. Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let initial_province = match lookup(ENV_PROVINCE) {
            Some(value) => {
                province::resolve(&value).ok_or(ConfigError::UnknownProvince {
                    var: ENV_PROVINCE,
                    value,
                })?
            }
            None => defaults.initial_province,
        };

        Ok(Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            debounce: Duration::from_millis(parse_u64(
                &lookup,
                ENV_DEBOUNCE_MS,
                DEFAULT_DEBOUNCE_MS,
            )?),
            province_delay: Duration::from_millis(parse_u64(
                &lookup,
                ENV_PROVINCE_DELAY_MS,
                DEFAULT_PROVINCE_DELAY_MS,
            )?),
            request_timeout: Duration::from_secs(parse_u64(
                &lookup,
                ENV_TIMEOUT_SECS,
                DEFAULT_TIMEOUT_SECS,
            )?),
            initial_year: lookup(ENV_YEAR).unwrap_or(defaults.initial_year),
            initial_province,
        })
    }

    pub fn with_initial_year(mut self, year: impl Into<String>) -> Self {
        self.initial_year = year.into();
        self
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert_eq!(config.province_delay, Duration::from_millis(1000));
        assert_eq!(config.initial_year, "2025");
        assert_eq!(config.initial_province.code, "CA-ON");
        assert_eq!(config.base_url, "https://date.nager.at");
    }

    #[test]
    fn overrides_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:9999"),
            (ENV_DEBOUNCE_MS, "250"),
            (ENV_PROVINCE_DELAY_MS, "0"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_YEAR, "2030"),
            (ENV_PROVINCE, "Quebec"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.province_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.initial_year, "2030");
        assert_eq!(config.initial_province.code, "CA-QC");
    }

    #[test]
    fn bad_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[(ENV_DEBOUNCE_MS, "-5")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { var: ENV_DEBOUNCE_MS, .. }
        ));
    }

    #[test]
    fn unknown_province_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[(ENV_PROVINCE, "CA-XX")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvince { .. }));
    }
}
