//! Analytics and optimizer configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analytics::MetricsPolicy;

/// Analytics configuration
///
/// Disabling analytics removes the optimizer from the resolver chain and
/// stops event recording.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalyticsConfig {
    /// Record events and optimize flows from them
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Match ratio for counting a completion toward an archetype
    #[serde(default = "default_reporting_match_threshold")]
    pub reporting_match_threshold: f64,

    /// Match ratio for following an archetype's path live
    #[serde(default = "default_optimization_match_threshold")]
    pub optimization_match_threshold: f64,

    /// Drop-off rates at or below this are not reported
    #[serde(default = "default_dropoff_inclusion_threshold")]
    pub dropoff_inclusion_threshold: f64,

    /// Drop-off rates above this raise a high-severity suggestion
    #[serde(default = "default_high_dropoff_threshold")]
    pub high_dropoff_threshold: f64,

    /// Completion rates below this raise a suggestion
    #[serde(default = "default_low_completion_threshold")]
    pub low_completion_threshold: f64,

    /// Average answer times above this raise a suggestion
    #[serde(default = "default_slow_response_threshold_ms")]
    pub slow_response_threshold_ms: u64,

    /// Number of most common paths to report
    #[serde(default = "default_top_paths_limit")]
    pub top_paths_limit: usize,
}

impl AnalyticsConfig {
    /// The policy consumed by metrics and the optimizer
    pub fn policy(&self) -> MetricsPolicy {
        MetricsPolicy {
            reporting_match_threshold: self.reporting_match_threshold,
            optimization_match_threshold: self.optimization_match_threshold,
            dropoff_inclusion_threshold: self.dropoff_inclusion_threshold,
            high_dropoff_threshold: self.high_dropoff_threshold,
            low_completion_threshold: self.low_completion_threshold,
            slow_response_threshold_ms: self.slow_response_threshold_ms,
            top_paths_limit: self.top_paths_limit,
        }
    }

    /// Validate analytics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let thresholds = [
            ("reporting_match_threshold", self.reporting_match_threshold),
            ("optimization_match_threshold", self.optimization_match_threshold),
            ("dropoff_inclusion_threshold", self.dropoff_inclusion_threshold),
            ("high_dropoff_threshold", self.high_dropoff_threshold),
            ("low_completion_threshold", self.low_completion_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ThresholdOutOfRange { name, value });
            }
        }
        if self.top_paths_limit == 0 {
            return Err(ValidationError::InvalidTopPathsLimit);
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            reporting_match_threshold: default_reporting_match_threshold(),
            optimization_match_threshold: default_optimization_match_threshold(),
            dropoff_inclusion_threshold: default_dropoff_inclusion_threshold(),
            high_dropoff_threshold: default_high_dropoff_threshold(),
            low_completion_threshold: default_low_completion_threshold(),
            slow_response_threshold_ms: default_slow_response_threshold_ms(),
            top_paths_limit: default_top_paths_limit(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_reporting_match_threshold() -> f64 {
    MetricsPolicy::default().reporting_match_threshold
}

fn default_optimization_match_threshold() -> f64 {
    MetricsPolicy::default().optimization_match_threshold
}

fn default_dropoff_inclusion_threshold() -> f64 {
    MetricsPolicy::default().dropoff_inclusion_threshold
}

fn default_high_dropoff_threshold() -> f64 {
    MetricsPolicy::default().high_dropoff_threshold
}

fn default_low_completion_threshold() -> f64 {
    MetricsPolicy::default().low_completion_threshold
}

fn default_slow_response_threshold_ms() -> u64 {
    MetricsPolicy::default().slow_response_threshold_ms
}

fn default_top_paths_limit() -> usize {
    MetricsPolicy::default().top_paths_limit
}
