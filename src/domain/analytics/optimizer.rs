//! Flow optimizer - archetype-driven next-question hints and diagnostics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::archetype::ArchetypeCatalog;
use super::metrics::{FlowMetrics, MetricsPolicy};
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::RespondentContext;

/// What an [`OptimizationSuggestion`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    HighDropoff,
    LowCompletion,
    SlowResponses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A diagnostic finding derived from flow metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub kind: SuggestionKind,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
}

/// Suggests next questions from the archetype catalog and turns metrics
/// into improvement suggestions.
///
/// Live selection takes the *first* archetype matching at the optimization
/// threshold, while reporting counts *every* archetype matching at the
/// stricter reporting threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowOptimizer {
    archetypes: ArchetypeCatalog,
    policy: MetricsPolicy,
}

impl Default for FlowOptimizer {
    fn default() -> Self {
        Self::new(ArchetypeCatalog::standard(), MetricsPolicy::default())
    }
}

impl FlowOptimizer {
    pub fn new(archetypes: ArchetypeCatalog, policy: MetricsPolicy) -> Self {
        Self { archetypes, policy }
    }

    pub fn archetypes(&self) -> &ArchetypeCatalog {
        &self.archetypes
    }

    pub fn policy(&self) -> &MetricsPolicy {
        &self.policy
    }

    /// Next question along the first matching archetype's primary path.
    ///
    /// Returns `None` when no archetype matches, the archetype has no path,
    /// the last answered question is not on the path, or it is the path's
    /// final step. Does not filter against `history`; callers do.
    pub fn optimal_next_question(
        &self,
        context: &RespondentContext,
        history: &[QuestionId],
    ) -> Option<QuestionId> {
        let archetype = self
            .archetypes
            .first_match(context, self.policy.optimization_match_threshold)?;
        let path = archetype.primary_path()?;
        let last = history.last()?;
        let position = path.iter().position(|id| id == last)?;
        let next = path.get(position + 1)?;

        debug!(
            archetype = %archetype.name,
            after = %last,
            next = %next,
            "Archetype path suggests next question"
        );
        Some(next.clone())
    }

    /// Independent findings from a metrics snapshot.
    ///
    /// One high-severity finding per steep drop-off point, then at most one
    /// low-completion and one slow-response finding.
    pub fn suggestions(&self, metrics: &FlowMetrics) -> Vec<OptimizationSuggestion> {
        let mut suggestions: Vec<OptimizationSuggestion> = metrics
            .drop_off_points
            .iter()
            .filter(|point| point.rate > self.policy.high_dropoff_threshold)
            .map(|point| OptimizationSuggestion {
                kind: SuggestionKind::HighDropoff,
                severity: Severity::High,
                message: format!(
                    "Question \"{}\" has a {}% drop-off rate",
                    point.question_id,
                    (point.rate * 100.0).round()
                ),
                recommendation: "Consider simplifying the question or providing more context"
                    .to_string(),
                question_id: Some(point.question_id.clone()),
            })
            .collect();

        if metrics.completion_rate < self.policy.low_completion_threshold {
            suggestions.push(OptimizationSuggestion {
                kind: SuggestionKind::LowCompletion,
                severity: Severity::Medium,
                message: format!(
                    "Overall completion rate is only {}%",
                    (metrics.completion_rate * 100.0).round()
                ),
                recommendation:
                    "Consider reducing the number of questions or improving engagement"
                        .to_string(),
                question_id: None,
            });
        }

        if metrics.average_time_per_question_ms > self.policy.slow_response_threshold_ms as f64 {
            suggestions.push(OptimizationSuggestion {
                kind: SuggestionKind::SlowResponses,
                severity: Severity::Low,
                message: format!(
                    "Users take an average of {}s per question",
                    (metrics.average_time_per_question_ms / 1000.0).round()
                ),
                recommendation:
                    "Consider simplifying answer options or providing clearer guidance"
                        .to_string(),
                question_id: None,
            });
        }

        suggestions
    }
}
