//! Metrics aggregator - pure derivation of flow metrics from an event log.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::archetype::{Archetype, ArchetypeCatalog};
use super::events::AnalyticsEvent;
use crate::domain::foundation::QuestionId;

/// Thresholds used by metric derivation and optimization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsPolicy {
    /// Minimum match ratio for a completion to count toward an archetype.
    pub reporting_match_threshold: f64,
    /// Minimum match ratio for live path optimization.
    pub optimization_match_threshold: f64,
    /// Drop-off rates at or below this are not reported.
    pub dropoff_inclusion_threshold: f64,
    /// Drop-off rates above this produce a high-severity suggestion.
    pub high_dropoff_threshold: f64,
    /// Completion rates below this produce a suggestion.
    pub low_completion_threshold: f64,
    /// Average answer times above this produce a suggestion.
    pub slow_response_threshold_ms: u64,
    /// How many of the most common paths to keep.
    pub top_paths_limit: usize,
}

impl Default for MetricsPolicy {
    fn default() -> Self {
        Self {
            reporting_match_threshold: 0.75,
            optimization_match_threshold: 0.6,
            dropoff_inclusion_threshold: 0.1,
            high_dropoff_threshold: 0.3,
            low_completion_threshold: 0.7,
            slow_response_threshold_ms: 30_000,
            top_paths_limit: 5,
        }
    }
}

/// A question that a notable share of viewers never answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropOffPoint {
    pub question_id: QuestionId,
    /// `1 - answers / views`.
    pub rate: f64,
}

/// An archetype together with its share of completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeShare {
    #[serde(flatten)]
    pub archetype: Archetype,
    /// Percentage of completions matching the archetype, in (0, 100].
    pub percentage: f64,
}

/// Aggregate flow metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Completions divided by views of the seed question; 0 without views.
    pub completion_rate: f64,
    /// Mean answer time over answers that have one; 0 without any.
    pub average_time_per_question_ms: f64,
    /// Most frequent completed paths, most frequent first.
    pub most_common_paths: Vec<Vec<QuestionId>>,
    /// Drop-off points above the inclusion threshold, highest first.
    pub drop_off_points: Vec<DropOffPoint>,
    /// Archetypes with a non-zero share, largest first.
    pub user_archetypes: Vec<ArchetypeShare>,
}

impl FlowMetrics {
    /// Derives metrics from a snapshot of the event log.
    ///
    /// Ties (equal path counts, equal drop-off rates, equal archetype
    /// shares) keep first-seen order.
    pub fn compute(
        events: &[AnalyticsEvent],
        seed: &str,
        archetypes: &ArchetypeCatalog,
        policy: &MetricsPolicy,
    ) -> Self {
        Self {
            completion_rate: completion_rate(events, seed),
            average_time_per_question_ms: average_time_per_question(events),
            most_common_paths: most_common_paths(events, policy.top_paths_limit),
            drop_off_points: drop_off_points(events, policy.dropoff_inclusion_threshold),
            user_archetypes: archetype_shares(
                events,
                archetypes,
                policy.reporting_match_threshold,
            ),
        }
    }

    /// Drop-off rate of a question, if it was reported.
    pub fn drop_off_rate(&self, question_id: &str) -> Option<f64> {
        self.drop_off_points
            .iter()
            .find(|p| p.question_id == *question_id)
            .map(|p| p.rate)
    }
}

fn completion_rate(events: &[AnalyticsEvent], seed: &str) -> f64 {
    let starts = events.iter().filter(|e| e.is_view_of(seed)).count();
    if starts == 0 {
        return 0.0;
    }
    let completions = events
        .iter()
        .filter(|e| matches!(e, AnalyticsEvent::Completion { .. }))
        .count();
    completions as f64 / starts as f64
}

fn average_time_per_question(events: &[AnalyticsEvent]) -> f64 {
    let times: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            AnalyticsEvent::Answer { time_spent_ms, .. } => *time_spent_ms,
            _ => None,
        })
        .collect();
    if times.is_empty() {
        return 0.0;
    }
    times.iter().sum::<u64>() as f64 / times.len() as f64
}

fn most_common_paths(events: &[AnalyticsEvent], limit: usize) -> Vec<Vec<QuestionId>> {
    let mut counts: Vec<(&[QuestionId], usize)> = Vec::new();
    let mut index: HashMap<&[QuestionId], usize> = HashMap::new();

    for event in events {
        if let AnalyticsEvent::Completion { path, .. } = event {
            let key = path.as_slice();
            match index.get(key) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push((key, 1));
                }
            }
        }
    }

    // Stable: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(path, _)| path.to_vec())
        .collect()
}

fn drop_off_points(events: &[AnalyticsEvent], inclusion_threshold: f64) -> Vec<DropOffPoint> {
    let mut tally: Vec<(&QuestionId, usize, usize)> = Vec::new();
    let mut index: HashMap<&QuestionId, usize> = HashMap::new();

    for event in events {
        if let AnalyticsEvent::View { question_id, .. } = event {
            match index.get(question_id) {
                Some(&i) => tally[i].1 += 1,
                None => {
                    index.insert(question_id, tally.len());
                    tally.push((question_id, 1, 0));
                }
            }
        }
    }
    for event in events {
        if let AnalyticsEvent::Answer { question_id, .. } = event {
            if let Some(&i) = index.get(question_id) {
                tally[i].2 += 1;
            }
        }
    }

    let mut points: Vec<DropOffPoint> = tally
        .into_iter()
        .map(|(question_id, views, answers)| DropOffPoint {
            question_id: question_id.clone(),
            rate: (1.0 - answers as f64 / views as f64).max(0.0),
        })
        .filter(|p| p.rate > inclusion_threshold)
        .collect();
    points.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    points
}

fn archetype_shares(
    events: &[AnalyticsEvent],
    archetypes: &ArchetypeCatalog,
    threshold: f64,
) -> Vec<ArchetypeShare> {
    let contexts: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            AnalyticsEvent::Completion { context, .. } => Some(context),
            _ => None,
        })
        .collect();
    if contexts.is_empty() {
        return Vec::new();
    }

    let mut shares: Vec<ArchetypeShare> = archetypes
        .iter()
        .map(|archetype| {
            let matches = contexts
                .iter()
                .filter(|ctx| archetype.matches(ctx, threshold))
                .count();
            ArchetypeShare {
                archetype: archetype.clone(),
                percentage: matches as f64 / contexts.len() as f64 * 100.0,
            }
        })
        .filter(|share| share.percentage > 0.0)
        .collect();
    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}
