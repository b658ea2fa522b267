use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

use super::Clock;

fn default_requests_per_minute() -> u32 {
    100
}

fn default_burst() -> u32 {
    1
}

/// Token-bucket quota shared by every caller of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
            burst: default_burst(),
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_burst(mut self, burst: u32) -> Self {
        self.burst = burst;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.requests_per_minute == 0 {
            return Err(ChartError::InvalidConfiguration(
                "rate limit must allow at least one request per minute".to_owned(),
            ));
        }
        if self.burst == 0 {
            return Err(ChartError::InvalidConfiguration(
                "rate limit burst must be at least 1".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Time needed to earn back one token.
    #[must_use]
    pub fn token_interval(self) -> Duration {
        Duration::nanoseconds(60_000_000_000 / i64::from(self.requests_per_minute.max(1)))
    }
}

/// Credit is kept in nanoseconds so that refills add up exactly.
#[derive(Debug)]
struct Bucket {
    credit_ns: i64,
    last_refill: DateTime<Utc>,
}

/// Non-blocking token bucket.
///
/// Starts full. Each admitted request spends one token; tokens come back at
/// `requests_per_minute` and never exceed `burst`.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    bucket: Mutex<Bucket>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> ChartResult<Self> {
        let config = config.validate()?;
        let bucket = Bucket {
            credit_ns: capacity_ns(config),
            last_refill: clock.now(),
        };
        Ok(Self {
            config,
            bucket: Mutex::new(bucket),
            clock,
        })
    }

    #[must_use]
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Spends one token if available. Never waits.
    #[must_use]
    pub fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut bucket, now);

        let cost = interval_ns(self.config);
        if bucket.credit_ns >= cost {
            bucket.credit_ns -= cost;
            true
        } else {
            trace!(credit_ns = bucket.credit_ns, cost, "rate limiter denied request");
            false
        }
    }

    /// Like [`Self::try_acquire`], mapped to `ChartError::RateLimited`.
    pub fn acquire(&self) -> ChartResult<()> {
        if self.try_acquire() {
            Ok(())
        } else {
            Err(ChartError::RateLimited)
        }
    }

    /// Tokens currently available, after refilling up to now.
    #[must_use]
    pub fn available(&self) -> f64 {
        let now = self.clock.now();
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut bucket, now);
        bucket.credit_ns as f64 / interval_ns(self.config) as f64
    }

    fn refill(&self, bucket: &mut Bucket, now: DateTime<Utc>) {
        let elapsed = now - bucket.last_refill;
        if elapsed <= Duration::zero() {
            return;
        }
        let earned = elapsed.num_nanoseconds().unwrap_or(i64::MAX);
        bucket.credit_ns = bucket
            .credit_ns
            .saturating_add(earned)
            .min(capacity_ns(self.config));
        bucket.last_refill = now;
    }
}

fn interval_ns(config: RateLimitConfig) -> i64 {
    config
        .token_interval()
        .num_nanoseconds()
        .unwrap_or(i64::MAX)
        .max(1)
}

fn capacity_ns(config: RateLimitConfig) -> i64 {
    interval_ns(config).saturating_mul(i64::from(config.burst))
}
