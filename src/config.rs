//! Typed configuration from environment variables.
//!
//! Loads once at startup and fails fast on malformed values. Every variable
//! is optional; unset ones fall back to defaults.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::limiter::TokenBucketConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the control loop evaluates a revive cycle.
    pub poll_interval: Duration,
    pub token_bucket: TokenBucketConfig,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let defaults = TokenBucketConfig::default();
        let token_bucket = TokenBucketConfig {
            initial: var_or("REVIVE_BUCKET_INITIAL", defaults.initial)?,
            capacity: var_or("REVIVE_BUCKET_CAPACITY", defaults.capacity)?,
            increment_interval: secs_or(
                "REVIVE_BUCKET_INCREMENT_SECS",
                defaults.increment_interval,
            )?,
            acquire_interval: secs_or("REVIVE_BUCKET_ACQUIRE_SECS", defaults.acquire_interval)?,
        };
        token_bucket.validate()?;

        let poll_interval = secs_or("REVIVE_POLL_INTERVAL_SECS", Duration::from_secs(5))?;
        if poll_interval.is_zero() {
            return Err(Error::Config(
                "REVIVE_POLL_INTERVAL_SECS must be > 0".to_string(),
            ));
        }

        Ok(Self {
            poll_interval,
            token_bucket,
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{name} has invalid value {raw:?}"))),
        Err(_) => Ok(default),
    }
}

fn secs_or(name: &str, default: Duration) -> Result<Duration> {
    var_or(name, default.as_secs()).map(Duration::from_secs)
}
