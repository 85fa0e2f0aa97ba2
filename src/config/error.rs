//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("max_questions must be at least 1")]
    InvalidMaxQuestions,

    #[error("Threshold {name} must be between 0 and 1, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("top_paths_limit must be at least 1")]
    InvalidTopPathsLimit,

    #[error("Flow definition file not found: {0}")]
    DefinitionNotFound(String),

    #[error("Invalid log level directive: {0}")]
    InvalidLogLevel(String),
}
