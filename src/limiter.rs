//! Rate limiting for revive calls.
//!
//! The revive manager only ever asks one question: may I revive now?
//! [`RateLimiter`] is that question. [`TokenBucket`] is the default answer.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};

/// Grants or denies permission to act. Never waits for permission.
pub trait RateLimiter {
    /// Take one permit if available. `false` means throttled.
    fn try_acquire(&mut self) -> bool;
}

impl<L: RateLimiter + ?Sized> RateLimiter for &mut L {
    fn try_acquire(&mut self) -> bool {
        (**self).try_acquire()
    }
}

impl<L: RateLimiter + ?Sized> RateLimiter for Box<L> {
    fn try_acquire(&mut self) -> bool {
        (**self).try_acquire()
    }
}

/// Always grants.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl RateLimiter for Unlimited {
    fn try_acquire(&mut self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Token bucket
// ---------------------------------------------------------------------------

/// Configuration for a [`TokenBucket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBucketConfig {
    /// Tokens available at construction.
    pub initial: u32,
    /// Maximum tokens the bucket holds.
    pub capacity: u32,
    /// One token is added per elapsed interval.
    pub increment_interval: Duration,
    /// Minimum spacing between two successful acquires.
    pub acquire_interval: Duration,
}

impl Default for TokenBucketConfig {
    fn default() -> Self {
        Self {
            initial: 256,
            capacity: 256,
            increment_interval: Duration::from_secs(30),
            acquire_interval: Duration::from_secs(5),
        }
    }
}

impl TokenBucketConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::Config("token bucket capacity must be > 0".to_string()));
        }
        if self.initial > self.capacity {
            return Err(Error::Config(format!(
                "token bucket initial count {} exceeds capacity {}",
                self.initial, self.capacity
            )));
        }
        if self.increment_interval.is_zero() {
            return Err(Error::Config(
                "token bucket increment interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Token bucket with a minimum spacing between acquires.
///
/// Uses [`tokio::time::Instant`], so a paused tokio clock drives refills in
/// tests.
#[derive(Debug)]
pub struct TokenBucket {
    config: TokenBucketConfig,
    count: u32,
    last_increment: Instant,
    last_acquire: Option<Instant>,
}

impl TokenBucket {
    pub fn new(config: TokenBucketConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            count: config.initial,
            config,
            last_increment: Instant::now(),
            last_acquire: None,
        })
    }

    /// Tokens currently available, after accounting for elapsed refills.
    pub fn available(&mut self) -> u32 {
        self.refill(Instant::now());
        self.count
    }

    fn refill(&mut self, now: Instant) {
        // A full bucket accrues nothing; the next token is a whole interval
        // after the bucket stops being full.
        if self.count >= self.config.capacity {
            self.last_increment = now;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_increment);
        let interval = self.config.increment_interval;
        let increments = elapsed.as_nanos() / interval.as_nanos();
        if increments == 0 {
            return;
        }

        let added = u32::try_from(increments).unwrap_or(u32::MAX);
        self.count = self.count.saturating_add(added).min(self.config.capacity);
        if self.count == self.config.capacity {
            self.last_increment = now;
        } else {
            // Keep the partial interval so refills don't drift.
            self.last_increment += interval * added;
        }
    }
}

impl RateLimiter for TokenBucket {
    fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        self.refill(now);

        if let Some(last) = self.last_acquire {
            let since = now.saturating_duration_since(last);
            if since < self.config.acquire_interval {
                debug!(
                    since_ms = since.as_millis() as u64,
                    min_ms = self.config.acquire_interval.as_millis() as u64,
                    "acquire denied: too soon after last acquire"
                );
                return false;
            }
        }

        if self.count == 0 {
            debug!("acquire denied: bucket empty");
            return false;
        }

        self.count -= 1;
        self.last_acquire = Some(now);
        true
    }
}
