//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ONBOARDING_FLOW` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment loads.
//!
//! # Example
//!
//! ```no_run
//! use onboarding_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Sessions end after {} questions", config.flow.max_questions);
//! ```

mod analytics;
mod error;
mod flow;
mod logging;

pub use analytics::AnalyticsConfig;
pub use error::{ConfigError, ValidationError};
pub use flow::FlowConfig;
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Flow engine configuration (question limit, definition file)
    #[serde(default)]
    pub flow: FlowConfig,

    /// Analytics and optimizer configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ONBOARDING_FLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ONBOARDING_FLOW__FLOW__MAX_QUESTIONS=8` -> `flow.max_questions = 8`
    /// - `ONBOARDING_FLOW__ANALYTICS__ENABLED=false` -> `analytics.enabled = false`
    /// - `ONBOARDING_FLOW__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ONBOARDING_FLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.flow.validate()?;
        self.analytics.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ONBOARDING_FLOW__FLOW__MAX_QUESTIONS",
        "ONBOARDING_FLOW__ANALYTICS__ENABLED",
        "ONBOARDING_FLOW__ANALYTICS__OPTIMIZATION_MATCH_THRESHOLD",
        "ONBOARDING_FLOW__LOGGING__FORMAT",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_loads_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.flow.max_questions, 8);
        assert!(config.analytics.enabled);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ONBOARDING_FLOW__FLOW__MAX_QUESTIONS", "5");
        env::set_var("ONBOARDING_FLOW__ANALYTICS__ENABLED", "false");
        env::set_var("ONBOARDING_FLOW__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.flow.max_questions, 5);
        assert!(!config.analytics.enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_out_of_range_threshold_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ONBOARDING_FLOW__ANALYTICS__OPTIMIZATION_MATCH_THRESHOLD", "2.5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analytics.optimization_match_threshold, 2.5);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ThresholdOutOfRange { .. })
        ));
    }
}
