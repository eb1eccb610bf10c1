//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Nested settings use the
//! `JWT_REVOKER` prefix with `__` separators; the deployment variables
//! `JWT_CLAIM`, `JWT_REVOKER_PORT`, `KRAKEND_HOST` and `KRAKEND_PORT` take
//! precedence over their nested equivalents.
//!
//! # Example
//!
//! ```no_run
//! use jwt_revoker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.backend.address());
//! ```

mod backend;
mod error;
mod server;
mod token;

pub use backend::{BackendConfig, BackendKind};
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use token::TokenConfig;

use serde::Deserialize;

/// Flat deployment variables and the nested keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("JWT_CLAIM", "token.claim"),
    ("JWT_REVOKER_PORT", "server.port"),
    ("KRAKEND_HOST", "backend.host"),
    ("KRAKEND_PORT", "backend.port"),
];

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (listen address, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Logout token handling (subject claim, body encoding)
    #[serde(default)]
    pub token: TokenConfig,

    /// Membership backend connection
    #[serde(default)]
    pub backend: BackendConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `JWT_REVOKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies the flat deployment variables on top
    ///
    /// # Environment Variable Format
    ///
    /// - `JWT_REVOKER__SERVER__JSON_LOGS=true` -> `server.json_logs = true`
    /// - `JWT_REVOKER__BACKEND__KIND=memory` -> `backend.kind = memory`
    /// - `KRAKEND_HOST=bloom` -> `backend.host = bloom`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(
            config::Environment::default()
                .prefix("JWT_REVOKER")
                .separator("__"),
        );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let config = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.backend.validate()?;
        Ok(())
    }
}
