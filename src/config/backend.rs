//! Membership backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Largest filter capacity accepted; bounds the in-memory filter allocation.
pub const MAX_CAPACITY: u64 = 1_000_000_000;

/// Which membership backend implementation to run against.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Shared RedisBloom filter (production)
    #[default]
    Redis,
    /// Process-local Bloom filter (development)
    Memory,
}

/// Membership backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Backend implementation
    #[serde(default)]
    pub kind: BackendKind,

    /// Backend host (`KRAKEND_HOST`)
    #[serde(default = "default_host")]
    pub host: String,

    /// Backend port (`KRAKEND_PORT`)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the Bloom filter holding revoked keys
    #[serde(default = "default_filter_name")]
    pub filter_name: String,

    /// Per-call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Expected number of revoked keys the filter is sized for
    #[serde(default = "default_capacity")]
    pub capacity: u64,

    /// Target false-positive rate of the filter
    #[serde(default = "default_error_rate")]
    pub error_rate: f64,
}

impl BackendConfig {
    /// `host:port` address of the backend
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection URL for the Redis client
    pub fn redis_url(&self) -> String {
        format!("redis://{}/", self.address())
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind == BackendKind::Redis {
            if self.host.trim().is_empty() {
                return Err(ValidationError::MissingRequired("KRAKEND_HOST"));
            }
            if self.port == 0 {
                return Err(ValidationError::InvalidPort);
            }
        }
        if self.filter_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("JWT_REVOKER__BACKEND__FILTER_NAME"));
        }
        if self.timeout_ms == 0 || self.timeout_ms > 60_000 {
            return Err(ValidationError::InvalidBackendTimeout);
        }
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(ValidationError::InvalidCapacity);
        }
        if !(self.error_rate > 0.0 && self.error_rate < 1.0) {
            return Err(ValidationError::InvalidErrorRate);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            host: default_host(),
            port: default_port(),
            filter_name: default_filter_name(),
            timeout_ms: default_timeout_ms(),
            capacity: default_capacity(),
            error_rate: default_error_rate(),
        }
    }
}

fn default_host() -> String {
    "krakend".to_string()
}

fn default_port() -> u16 {
    1234
}

fn default_filter_name() -> String {
    "revoked-tokens".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_capacity() -> u64 {
    1_000_000
}

fn default_error_rate() -> f64 {
    0.001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.kind, BackendKind::Redis);
        assert_eq!(config.address(), "krakend:1234");
        assert_eq!(config.redis_url(), "redis://krakend:1234/");
        assert_eq!(config.timeout(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_host() {
        let config = BackendConfig {
            host: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("KRAKEND_HOST"))
        );
    }

    #[test]
    fn test_memory_backend_ignores_host() {
        let config = BackendConfig {
            kind: BackendKind::Memory,
            host: String::new(),
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let config = BackendConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBackendTimeout));

        let config = BackendConfig {
            timeout_ms: 120_000,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBackendTimeout));
    }

    #[test]
    fn test_validation_error_rate_bounds() {
        for rate in [0.0, 1.0, -0.1, f64::NAN] {
            let config = BackendConfig {
                error_rate: rate,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidErrorRate));
        }
    }

    #[test]
    fn test_validation_zero_capacity() {
        let config = BackendConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCapacity));
    }

    #[test]
    fn test_validation_capacity_upper_bound() {
        let at_limit = BackendConfig {
            kind: BackendKind::Memory,
            capacity: MAX_CAPACITY,
            ..Default::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));

        let too_large = BackendConfig {
            kind: BackendKind::Memory,
            capacity: MAX_CAPACITY + 1,
            ..Default::default()
        };
        assert_eq!(too_large.validate(), Err(ValidationError::InvalidCapacity));

        let saturating = BackendConfig {
            capacity: u64::MAX,
            ..Default::default()
        };
        assert_eq!(saturating.validate(), Err(ValidationError::InvalidCapacity));
    }
}
