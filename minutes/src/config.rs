//! Configuration module for auspol-minutes.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `AUSPOL_CHAMBER` | No | `house` | `house` or `federation` |
//! | `AUSPOL_MINUTES_URL` | No | chamber URL | Overrides the live minutes URL |
//! | `AUSPOL_TIMEOUT_SECS` | No | 30 | HTTP request timeout |
//! | `AUSPOL_POLL_INTERVAL_SECS` | No | 60 | Seconds between polls in `watch` |
//!
//! # Example
//!
//! ```no_run
//! use auspol_minutes::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Minutes URL: {}", config.minutes_url);
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::fetcher::DEFAULT_TIMEOUT_SECS;

/// Default polling interval for `watch`.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

const HOUSE_URL: &str =
    "https://www.aph.gov.au/Parliamentary_Business/Chamber_documents/Live_Minutes";

const FEDERATION_URL: &str =
    "https://www.aph.gov.au/Parliamentary_Business/Chamber_documents/Live_Federation_Chamber_Minutes";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Chamber whose live minutes are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chamber {
    /// House of Representatives main chamber.
    #[default]
    HouseOfRepresentatives,
    /// Federation Chamber.
    FederationChamber,
}

impl Chamber {
    /// Live minutes URL published for this chamber.
    #[must_use]
    pub fn minutes_url(self) -> &'static str {
        match self {
            Self::HouseOfRepresentatives => HOUSE_URL,
            Self::FederationChamber => FEDERATION_URL,
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HouseOfRepresentatives => f.write_str("house"),
            Self::FederationChamber => f.write_str("federation"),
        }
    }
}

impl FromStr for Chamber {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "house" | "reps" | "representatives" => Ok(Self::HouseOfRepresentatives),
            "federation" | "fed" | "federation-chamber" => Ok(Self::FederationChamber),
            other => Err(ConfigError::InvalidValue {
                key: "AUSPOL_CHAMBER".to_string(),
                message: format!("expected 'house' or 'federation', got '{other}'"),
            }),
        }
    }
}

/// Configuration for auspol-minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chamber being followed.
    pub chamber: Chamber,

    /// Page to fetch. Defaults to the chamber's live minutes URL.
    pub minutes_url: String,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Seconds between polls when watching.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_chamber(Chamber::default())
    }
}

impl Config {
    /// Default configuration for `chamber`.
    #[must_use]
    pub fn for_chamber(chamber: Chamber) -> Self {
        Self {
            chamber,
            minutes_url: chamber.minutes_url().to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `AUSPOL_CHAMBER` is not a known chamber
    /// - `AUSPOL_TIMEOUT_SECS` or `AUSPOL_POLL_INTERVAL_SECS` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: AUSPOL_CHAMBER (default: house)
        let chamber = match env::var("AUSPOL_CHAMBER") {
            Ok(val) => val.parse()?,
            Err(_) => Chamber::default(),
        };

        // Optional: AUSPOL_MINUTES_URL (default: chamber URL)
        let minutes_url = env::var("AUSPOL_MINUTES_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| chamber.minutes_url().to_string());

        let timeout_secs = positive_secs("AUSPOL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let poll_interval_secs =
            positive_secs("AUSPOL_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;

        Ok(Self {
            chamber,
            minutes_url,
            timeout_secs,
            poll_interval_secs,
        })
    }

    /// Switches to `chamber`, resetting the URL to that chamber's page.
    #[must_use]
    pub fn with_chamber(mut self, chamber: Chamber) -> Self {
        self.chamber = chamber;
        self.minutes_url = chamber.minutes_url().to_string();
        self
    }

    /// HTTP request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Interval between polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Reads a positive number of seconds from `key`, or `default` if unset.
fn positive_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(val) => {
            let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected positive integer, got '{val}'"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1 second".to_string(),
                });
            }
            Ok(secs)
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to run tests with isolated environment variables.
    /// Clears all AUSPOL_* vars before the test and restores them after.
    fn with_clean_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let saved_vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with("AUSPOL_"))
            .collect();

        for (key, _) in &saved_vars {
            env::remove_var(key);
        }

        let result = f();

        for (key, _) in env::vars().filter(|(k, _)| k.starts_with("AUSPOL_")) {
            env::remove_var(key);
        }
        for (key, value) in saved_vars {
            env::set_var(key, value);
        }

        result
    }

    #[test]
    #[serial]
    fn test_defaults() {
        with_clean_env(|| {
            let config = Config::from_env().expect("should parse empty env");
            assert_eq!(config, Config::default());
            assert_eq!(config.chamber, Chamber::HouseOfRepresentatives);
            assert_eq!(config.minutes_url, HOUSE_URL);
            assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
            assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        });
    }

    #[test]
    #[serial]
    fn test_federation_chamber() {
        with_clean_env(|| {
            env::set_var("AUSPOL_CHAMBER", "Federation");

            let config = Config::from_env().expect("should parse chamber");
            assert_eq!(config.chamber, Chamber::FederationChamber);
            assert_eq!(config.minutes_url, FEDERATION_URL);
        });
    }

    #[test]
    #[serial]
    fn test_url_override() {
        with_clean_env(|| {
            env::set_var("AUSPOL_CHAMBER", "federation");
            env::set_var("AUSPOL_MINUTES_URL", "http://localhost:8080/minutes");
            env::set_var("AUSPOL_TIMEOUT_SECS", "5");
            env::set_var("AUSPOL_POLL_INTERVAL_SECS", "15");

            let config = Config::from_env().expect("should parse full config");
            assert_eq!(config.chamber, Chamber::FederationChamber);
            assert_eq!(config.minutes_url, "http://localhost:8080/minutes");
            assert_eq!(config.timeout(), Duration::from_secs(5));
            assert_eq!(config.poll_interval(), Duration::from_secs(15));
        });
    }

    #[test]
    #[serial]
    fn test_unknown_chamber() {
        with_clean_env(|| {
            env::set_var("AUSPOL_CHAMBER", "senate");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, ref message }
                    if key == "AUSPOL_CHAMBER" && message.contains("senate")
            ));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_timeout() {
        with_clean_env(|| {
            env::set_var("AUSPOL_TIMEOUT_SECS", "soon");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, .. } if key == "AUSPOL_TIMEOUT_SECS"
            ));
        });
    }

    #[test]
    #[serial]
    fn test_zero_poll_interval_rejected() {
        with_clean_env(|| {
            env::set_var("AUSPOL_POLL_INTERVAL_SECS", "0");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, ref message }
                    if key == "AUSPOL_POLL_INTERVAL_SECS" && message.contains("at least 1 second")
            ));
        });
    }

    #[test]
    fn test_with_chamber_resets_url() {
        let config = Config {
            minutes_url: "http://localhost/custom".to_string(),
            ..Config::default()
        }
        .with_chamber(Chamber::FederationChamber);
        assert_eq!(config.minutes_url, FEDERATION_URL);
    }

    #[test]
    fn test_chamber_display_roundtrip() {
        for chamber in [Chamber::HouseOfRepresentatives, Chamber::FederationChamber] {
            assert_eq!(chamber.to_string().parse::<Chamber>().unwrap(), chamber);
        }
    }
}
