//! FlowAnalyticsService - Query facade over recorded flow analytics.
//!
//! Reads a snapshot from the recorder and derives metrics, suggestions and
//! archetype-guided next questions from it.

use std::sync::Arc;

use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::domain::analytics::{
    ArchetypeCatalog, FlowMetrics, FlowOptimizer, MetricsPolicy, OptimizationSuggestion,
};
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::{FlowDefinition, RespondentContext};
use crate::ports::AnalyticsRecorder;

/// Analytics queries for one flow definition.
///
/// Completion rate is measured against views of `seed`, so the service must
/// be built for the definition whose sessions feed the recorder.
pub struct FlowAnalyticsService {
    recorder: Arc<dyn AnalyticsRecorder>,
    seed: QuestionId,
    optimizer: FlowOptimizer,
}

impl FlowAnalyticsService {
    pub fn new(
        recorder: Arc<dyn AnalyticsRecorder>,
        seed: QuestionId,
        optimizer: FlowOptimizer,
    ) -> Self {
        Self {
            recorder,
            seed,
            optimizer,
        }
    }

    /// Service for `definition` using the standard archetypes and the
    /// configured thresholds.
    pub fn for_definition(
        recorder: Arc<dyn AnalyticsRecorder>,
        definition: &FlowDefinition,
        config: &AnalyticsConfig,
    ) -> Self {
        Self::new(
            recorder,
            definition.seed().clone(),
            FlowOptimizer::new(ArchetypeCatalog::standard(), config.policy()),
        )
    }

    pub fn optimizer(&self) -> &FlowOptimizer {
        &self.optimizer
    }

    pub fn policy(&self) -> &MetricsPolicy {
        self.optimizer.policy()
    }

    /// Metrics over every event recorded so far.
    pub fn get_metrics(&self) -> FlowMetrics {
        let events = self.recorder.events();
        let metrics = FlowMetrics::compute(
            &events,
            self.seed.as_str(),
            self.optimizer.archetypes(),
            self.optimizer.policy(),
        );
        debug!(
            events = events.len(),
            completion_rate = metrics.completion_rate,
            drop_off_points = metrics.drop_off_points.len(),
            "Computed flow metrics"
        );
        metrics
    }

    /// Suggestions derived from a fresh metrics snapshot.
    pub fn get_optimization_suggestions(&self) -> Vec<OptimizationSuggestion> {
        self.optimizer.suggestions(&self.get_metrics())
    }

    /// Archetype-guided next question, ignoring candidates already visited.
    pub fn get_optimal_next_question(
        &self,
        context: &RespondentContext,
        history: &[QuestionId],
    ) -> Option<QuestionId> {
        self.optimizer
            .optimal_next_question(context, history)
            .filter(|candidate| !history.contains(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryAnalyticsRecorder, ManualClock};
    use crate::domain::analytics::{Severity, SuggestionKind};
    use crate::domain::foundation::SessionId;
    use crate::domain::questionnaire::standard::{
        FAMILY_RELIANCE, ORGANIZATION_STATUS, SPOUSE_CHALLENGE,
    };
    use crate::domain::questionnaire::{
        ComplexityLevel, FamilyFocus, PreparednessLevel, UrgencyLevel,
    };

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    fn service() -> (Arc<ManualClock>, Arc<InMemoryAnalyticsRecorder>, FlowAnalyticsService) {
        let clock = Arc::new(ManualClock::default());
        let recorder = Arc::new(InMemoryAnalyticsRecorder::with_clock(clock.clone()));
        let service = FlowAnalyticsService::for_definition(
            recorder.clone(),
            &FlowDefinition::standard(),
            &AnalyticsConfig::default(),
        );
        (clock, recorder, service)
    }

    mod metrics {
        use super::*;

        #[test]
        fn empty_log_yields_default_metrics() {
            let (_, _, service) = service();
            assert_eq!(service.get_metrics(), FlowMetrics::default());
        }

        #[test]
        fn completion_rate_counts_seed_views() {
            let (_, recorder, service) = service();
            let seed = qid(FAMILY_RELIANCE);
            for _ in 0..4 {
                recorder.track_question_view(SessionId::new(), &seed);
            }
            recorder.track_completion(
                SessionId::new(),
                &[seed.clone()],
                &RespondentContext::default(),
            );

            assert!((service.get_metrics().completion_rate - 0.25).abs() < 1e-9);
        }

        #[test]
        fn views_of_other_questions_do_not_count_as_starts() {
            let (_, recorder, service) = service();
            recorder.track_question_view(SessionId::new(), &qid(SPOUSE_CHALLENGE));

            assert_eq!(service.get_metrics().completion_rate, 0.0);
        }
    }

    mod suggestions {
        use super::*;

        #[test]
        fn no_events_suggests_low_completion_only() {
            let (_, _, service) = service();
            let suggestions = service.get_optimization_suggestions();

            assert_eq!(suggestions.len(), 1);
            assert_eq!(suggestions[0].kind, SuggestionKind::LowCompletion);
        }

        #[test]
        fn steep_drop_off_is_high_severity() {
            let (clock, recorder, service) = service();
            let q = qid(ORGANIZATION_STATUS);
            let session = SessionId::new();
            for _ in 0..10 {
                recorder.track_question_view(session, &q);
            }
            clock.advance_millis(1_000);
            for _ in 0..5 {
                recorder.track_answer(session, &q, "no-system", &RespondentContext::default());
            }

            let high: Vec<_> = service
                .get_optimization_suggestions()
                .into_iter()
                .filter(|s| s.kind == SuggestionKind::HighDropoff)
                .collect();
            assert_eq!(high.len(), 1);
            assert_eq!(high[0].severity, Severity::High);
            assert_eq!(high[0].question_id.as_ref(), Some(&q));
        }
    }

    mod optimal_next {
        use super::*;

        fn overwhelmed_provider() -> RespondentContext {
            RespondentContext {
                preparedness_level: PreparednessLevel::Low,
                family_focus: FamilyFocus::Spouse,
                urgency_level: UrgencyLevel::Immediate,
                complexity_level: ComplexityLevel::Basic,
            }
        }

        #[test]
        fn follows_archetype_path() {
            let (_, _, service) = service();
            let next = service
                .get_optimal_next_question(&overwhelmed_provider(), &[qid(FAMILY_RELIANCE)]);
            assert_eq!(next, Some(qid(SPOUSE_CHALLENGE)));
        }

        #[test]
        fn visited_candidate_is_not_returned() {
            let (_, _, service) = service();
            let history = [qid(SPOUSE_CHALLENGE), qid(FAMILY_RELIANCE)];
            let next = service.get_optimal_next_question(&overwhelmed_provider(), &history);
            assert_eq!(next, None);
        }
    }
}
