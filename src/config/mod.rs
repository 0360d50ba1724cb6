//! Engine configuration
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `AUTOCLOSER`
//! prefix and `__` separating nested sections.
//!
//! # Example
//!
//! ```no_run
//! use autocloser_core::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use telemetry::init_tracing;

use serde::Deserialize;

/// Message delivery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Retry budget for outbound messages without an explicit override.
    pub default_max_retries: u32,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            default_max_retries: 3,
        }
    }
}

/// Payment settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    /// Minutes a checkout link stays valid.
    pub checkout_expiry_minutes: i64,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            checkout_expiry_minutes: 30,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter when RUST_LOG is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Root engine configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub messaging: MessagingConfig,
    pub payments: PaymentsConfig,
    pub log: LogConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `AUTOCLOSER` prefix, e.g.
    /// `AUTOCLOSER__PAYMENTS__CHECKOUT_EXPIRY_MINUTES=45`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AUTOCLOSER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.payments.checkout_expiry_minutes <= 0 {
            return Err(ValidationError::InvalidCheckoutExpiry);
        }
        if self.log.filter.trim().is_empty() {
            return Err(ValidationError::EmptyLogFilter);
        }
        Ok(())
    }
}
