use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::core::MAX_DIMENSION;
use crate::error::{ChartError, ChartResult};

use super::RateLimitConfig;

/// Largest TTL a `chrono::Duration` can hold at millisecond precision.
const MAX_TTL_SECS: i64 = i64::MAX / 1000;

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

fn default_max_dimension() -> u32 {
    MAX_DIMENSION
}

/// Service-level settings.
///
/// Every field has a serde default, so `{}` deserializes to
/// `ServiceConfig::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Used when a request omits the width or sends 0.
    #[serde(default = "default_width")]
    pub default_width: u32,
    #[serde(default = "default_height")]
    pub default_height: u32,
    /// Largest width or height a request may ask for.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            rate_limit: RateLimitConfig::default(),
            default_width: default_width(),
            default_height: default_height(),
            max_dimension: default_max_dimension(),
        }
    }
}

impl ServiceConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to parse service config: {e}"))
        })?;
        config.validate()
    }

    #[must_use]
    pub fn with_cache_ttl_secs(mut self, cache_ttl_secs: u64) -> Self {
        self.cache_ttl_secs = cache_ttl_secs;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    #[must_use]
    pub fn with_default_dimensions(mut self, width: u32, height: u32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    #[must_use]
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    #[must_use]
    pub fn cache_ttl(self) -> Duration {
        let secs = i64::try_from(self.cache_ttl_secs)
            .unwrap_or(i64::MAX)
            .min(MAX_TTL_SECS);
        Duration::seconds(secs)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.cache_ttl_secs == 0 {
            return Err(ChartError::InvalidConfiguration(
                "cache_ttl_secs must be > 0".to_owned(),
            ));
        }
        if self.cache_ttl_secs > MAX_TTL_SECS as u64 {
            return Err(ChartError::InvalidConfiguration(format!(
                "cache_ttl_secs is too large: {}",
                self.cache_ttl_secs
            )));
        }
        if self.max_dimension == 0 || self.max_dimension > MAX_DIMENSION {
            return Err(ChartError::InvalidConfiguration(format!(
                "max_dimension must be between 1 and {MAX_DIMENSION}"
            )));
        }
        for (name, value) in [
            ("default_width", self.default_width),
            ("default_height", self.default_height),
        ] {
            if value == 0 || value > self.max_dimension {
                return Err(ChartError::InvalidConfiguration(format!(
                    "{name} must be between 1 and {}, got {value}",
                    self.max_dimension
                )));
            }
        }
        self.rate_limit.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceConfig;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ServiceConfig::from_json_str("{}").expect("config");
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.cache_ttl().num_seconds(), 3600);
        assert_eq!(config.rate_limit.requests_per_minute, 100);
        assert_eq!(config.rate_limit.burst, 1);
    }

    #[test]
    fn partial_rate_limit_keeps_other_defaults() {
        let config =
            ServiceConfig::from_json_str(r#"{"rate_limit":{"burst":5},"default_width":640}"#)
                .expect("config");
        assert_eq!(config.rate_limit.requests_per_minute, 100);
        assert_eq!(config.rate_limit.burst, 5);
        assert_eq!(config.default_width, 640);
        assert_eq!(config.default_height, 400);
    }

    #[test]
    fn defaults_larger_than_max_dimension_are_rejected() {
        let config = ServiceConfig::default().with_max_dimension(600);
        assert!(config.validate().is_err());
        assert!(
            ServiceConfig::default()
                .with_max_dimension(5000)
                .validate()
                .is_err()
        );
    }
}
