//! Configuration module for Roster.
//!
//! Loads configuration from environment variables. Every value is optional
//! and falls back to a built-in default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "https://api.example.com";
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 5.0;
pub const DEFAULT_FETCH_DELAY_MS: u64 = 100;
pub const DEFAULT_DATABASE_URL: &str = "mock://localhost/users";
pub const DEFAULT_DB_CONNECT_DELAY_MS: u64 = 100;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Remote user API
    pub api_base_url: String,
    /// Declared for parity with the remote API contract; fetches never retry.
    pub retry_attempts: u32,
    /// Declared for parity with the remote API contract; no timeout is applied.
    pub timeout_seconds: f64,
    /// Simulated round-trip of a remote fetch.
    pub fetch_delay: Duration,

    // Database
    pub database_url: String,
    pub db_connect_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_connect_delay: Duration::from_millis(DEFAULT_DB_CONNECT_DELAY_MS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `main` loads `.env` before calling this.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: text("API_BASE_URL", DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            retry_attempts: parse_or(&lookup, "RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS),
            timeout_seconds: parse_or(&lookup, "TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS),
            fetch_delay: Duration::from_millis(parse_or(
                &lookup,
                "FETCH_DELAY_MS",
                DEFAULT_FETCH_DELAY_MS,
            )),
            database_url: text("DATABASE_URL", DEFAULT_DATABASE_URL),
            db_connect_delay: Duration::from_millis(parse_or(
                &lookup,
                "DB_CONNECT_DELAY_MS",
                DEFAULT_DB_CONNECT_DELAY_MS,
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value {:?}, using default {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_BASE_URL", "https://users.internal/"),
            ("RETRY_ATTEMPTS", "5"),
            ("TIMEOUT_SECONDS", "1.5"),
            ("FETCH_DELAY_MS", "7"),
            ("DATABASE_URL", "mock://db/test"),
            ("DB_CONNECT_DELAY_MS", "0"),
        ]);

        assert_eq!(config.api_base_url, "https://users.internal");
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.timeout(), Duration::from_millis(1500));
        assert_eq!(config.fetch_delay, Duration::from_millis(7));
        assert_eq!(config.database_url, "mock://db/test");
        assert_eq!(config.db_connect_delay, Duration::ZERO);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("RETRY_ATTEMPTS", "many"), ("DATABASE_URL", "  ")]);

        assert_eq!(config.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }
}
