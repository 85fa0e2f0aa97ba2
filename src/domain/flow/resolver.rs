//! Next-question resolution as an ordered list of strategies.
//!
//! Each strategy proposes at most one candidate from the current turn's
//! inputs. Strategies are tried in order; a candidate already in the
//! history, or one the definition cannot resolve, is skipped and the next
//! strategy gets its turn. A generated question is only offered when the
//! definition has a flow edge for it.

use std::fmt;

use tracing::{debug, warn};

use super::answers::AnswerSheet;
use crate::domain::analytics::FlowOptimizer;
use crate::domain::foundation::{QuestionId, SessionId};
use crate::domain::questionnaire::{
    DynamicQuestionGenerator, FlowDefinition, Question, RespondentContext,
};

/// One way of choosing the next question.
#[derive(Debug, Clone)]
pub enum ResolverStrategy {
    /// Follows the first matching archetype's typical path.
    Optimizer(FlowOptimizer),
    /// Injects a context-triggered question.
    DynamicGenerator(DynamicQuestionGenerator),
    /// Follows the current question's flow edge for the given answer.
    StaticGraph,
    /// Follows the definition's linear fallback map.
    DefaultPath,
}

impl ResolverStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ResolverStrategy::Optimizer(_) => "optimizer",
            ResolverStrategy::DynamicGenerator(_) => "dynamic_generator",
            ResolverStrategy::StaticGraph => "static_graph",
            ResolverStrategy::DefaultPath => "default_path",
        }
    }

    /// The strategies used when analytics are disabled.
    pub fn fallback_chain() -> Vec<ResolverStrategy> {
        vec![
            ResolverStrategy::DynamicGenerator(DynamicQuestionGenerator::new()),
            ResolverStrategy::StaticGraph,
            ResolverStrategy::DefaultPath,
        ]
    }

    fn propose(&self, input: &ResolutionInput<'_>) -> Option<Candidate> {
        match self {
            ResolverStrategy::Optimizer(optimizer) => optimizer
                .optimal_next_question(input.context, input.history)
                .map(Candidate::by_id),
            ResolverStrategy::DynamicGenerator(generator) => generator
                .generate(input.context, input.answers)
                .map(Candidate::generated),
            ResolverStrategy::StaticGraph => input
                .definition
                .edge(input.current.as_str())
                .and_then(|edge| edge.next_for(input.answer))
                .cloned()
                .map(Candidate::by_id),
            ResolverStrategy::DefaultPath => input
                .definition
                .default_next(input.current.as_str())
                .cloned()
                .map(Candidate::by_id),
        }
    }
}

impl fmt::Display for ResolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a strategy may look at for one turn.
///
/// `context` and `answers` already include the answer being processed.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionInput<'a> {
    pub session_id: SessionId,
    pub definition: &'a FlowDefinition,
    pub context: &'a RespondentContext,
    pub history: &'a [QuestionId],
    pub answers: &'a AnswerSheet,
    pub current: &'a QuestionId,
    pub answer: &'a str,
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub question_id: QuestionId,
    /// Name of the strategy that produced the id.
    pub strategy: &'static str,
    /// Question to store in the session because the catalog lacks it.
    pub injected: Option<Question>,
}

struct Candidate {
    id: QuestionId,
    generated: Option<Question>,
}

impl Candidate {
    fn by_id(id: QuestionId) -> Self {
        Self { id, generated: None }
    }

    fn generated(question: Question) -> Self {
        Self {
            id: question.id.clone(),
            generated: Some(question),
        }
    }
}

/// Tries each strategy in order and returns the first usable candidate.
pub fn resolve(strategies: &[ResolverStrategy], input: &ResolutionInput<'_>) -> Option<Resolution> {
    for strategy in strategies {
        let Some(candidate) = strategy.propose(input) else {
            continue;
        };

        if input.history.contains(&candidate.id) {
            debug!(
                session_id = %input.session_id,
                strategy = strategy.name(),
                candidate = %candidate.id,
                "Candidate already visited, trying next strategy"
            );
            continue;
        }

        let injected = match candidate.generated {
            Some(question) if input.definition.edge(question.id.as_str()).is_none() => {
                warn!(
                    session_id = %input.session_id,
                    strategy = strategy.name(),
                    question_id = %question.id,
                    "Generated question has no flow edge, trying next strategy"
                );
                continue;
            }
            Some(question) => Some(question),
            None if input.definition.catalog().contains(candidate.id.as_str()) => None,
            None => match DynamicQuestionGenerator::question_by_id(candidate.id.as_str()) {
                Some(question) => Some(question),
                None => {
                    warn!(
                        session_id = %input.session_id,
                        strategy = strategy.name(),
                        candidate = %candidate.id,
                        "Candidate is not defined, trying next strategy"
                    );
                    continue;
                }
            },
        };

        debug!(
            session_id = %input.session_id,
            strategy = strategy.name(),
            question_id = %candidate.id,
            "Resolved next question"
        );
        return Some(Resolution {
            question_id: candidate.id,
            strategy: strategy.name(),
            injected,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::{
        FamilyFocus, PartialContext, PreparednessLevel, UrgencyLevel, CHILDREN_AGE_ID,
        QUICK_WIN_ID,
    };

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    struct Turn {
        definition: std::sync::Arc<FlowDefinition>,
        context: RespondentContext,
        history: Vec<QuestionId>,
        answers: AnswerSheet,
        current: QuestionId,
        answer: String,
    }

    impl Turn {
        fn new(current: &str, answer: &str, context: PartialContext) -> Self {
            let mut answers = AnswerSheet::new();
            answers.record(qid(current), answer.to_string());
            Self {
                definition: FlowDefinition::standard(),
                context: RespondentContext::default().merge(&context),
                history: vec![qid(current)],
                answers,
                current: qid(current),
                answer: answer.to_string(),
            }
        }

        fn with_definition(mut self, definition: FlowDefinition) -> Self {
            self.definition = std::sync::Arc::new(definition);
            self
        }

        fn with_history(mut self, ids: &[&str]) -> Self {
            self.history = ids.iter().map(|id| qid(id)).collect();
            self
        }

        fn resolve(&self, strategies: &[ResolverStrategy]) -> Option<Resolution> {
            resolve(
                strategies,
                &ResolutionInput {
                    session_id: SessionId::new(),
                    definition: &self.definition,
                    context: &self.context,
                    history: &self.history,
                    answers: &self.answers,
                    current: &self.current,
                    answer: &self.answer,
                },
            )
        }
    }

    fn full_chain() -> Vec<ResolverStrategy> {
        let mut chain = vec![ResolverStrategy::Optimizer(FlowOptimizer::default())];
        chain.extend(ResolverStrategy::fallback_chain());
        chain
    }

    #[test]
    fn optimizer_wins_when_it_has_a_candidate() {
        let turn = Turn::new(
            "family-reliance",
            "spouse-children",
            PartialContext::new()
                .family(FamilyFocus::Spouse)
                .urgency(UrgencyLevel::Immediate),
        );
        let resolution = turn.resolve(&full_chain()).unwrap();
        assert_eq!(resolution.question_id, "spouse-challenge");
        assert_eq!(resolution.strategy, "optimizer");
        assert!(resolution.injected.is_none());
    }

    #[test]
    fn generator_is_consulted_before_the_graph() {
        let turn = Turn::new(
            "spouse-challenge",
            "children-decisions",
            PartialContext::new().family(FamilyFocus::Children),
        );
        let resolution = turn.resolve(&ResolverStrategy::fallback_chain()).unwrap();
        assert_eq!(resolution.question_id, CHILDREN_AGE_ID);
        assert_eq!(resolution.strategy, "dynamic_generator");
        assert!(resolution.injected.is_some());
    }

    #[test]
    fn graph_edge_is_followed_without_generator_candidate() {
        let turn = Turn::new("family-reliance", "self-focused", PartialContext::new());
        let resolution = turn.resolve(&ResolverStrategy::fallback_chain()).unwrap();
        assert_eq!(resolution.question_id, "organization-status");
        assert_eq!(resolution.strategy, "static_graph");
    }

    #[test]
    fn visited_candidates_fall_through_to_next_strategy() {
        let turn = Turn::new(
            "family-reliance",
            "self-focused",
            PartialContext::new()
                .preparedness(PreparednessLevel::Low)
                .urgency(UrgencyLevel::Immediate),
        )
        .with_history(&["family-reliance", QUICK_WIN_ID]);
        let resolution = turn.resolve(&ResolverStrategy::fallback_chain()).unwrap();
        assert_eq!(resolution.question_id, "organization-status");
    }

    #[test]
    fn default_path_is_the_last_resort() {
        let turn = Turn::new("family-reliance", "self-focused", PartialContext::new())
            .with_history(&["family-reliance", "organization-status"]);
        let resolution = turn.resolve(&ResolverStrategy::fallback_chain()).unwrap();
        assert_eq!(resolution.question_id, "spouse-challenge");
        assert_eq!(resolution.strategy, "default_path");
    }

    #[test]
    fn nothing_resolves_for_terminal_question() {
        let turn = Turn::new("confidence-builder", "family-prepared", PartialContext::new());
        assert!(turn.resolve(&ResolverStrategy::fallback_chain()).is_none());
    }

    #[test]
    fn generated_question_without_edge_is_skipped() {
        let definition = FlowDefinition::from_yaml_str(
            r#"
seed: start
questions:
  - id: start
    text: How do you feel?
    kind: primary
    options:
      - { value: panic, label: Panicked }
  - id: wrap
    text: Done?
    kind: followup
    options:
      - { value: done, label: Done }
edges:
  - question_id: start
    next:
      panic: wrap
  - question_id: wrap
    next:
      done: ~
"#,
        )
        .unwrap();
        let turn = Turn::new(
            "start",
            "panic",
            PartialContext::new()
                .preparedness(PreparednessLevel::Low)
                .urgency(UrgencyLevel::Immediate),
        )
        .with_definition(definition);

        let resolution = turn.resolve(&ResolverStrategy::fallback_chain()).unwrap();
        assert_eq!(resolution.question_id, "wrap");
        assert_eq!(resolution.strategy, "static_graph");
        assert!(resolution.injected.is_none());
    }

    #[test]
    fn strategy_names_are_stable() {
        let names: Vec<&str> = full_chain().iter().map(ResolverStrategy::name).collect();
        assert_eq!(
            names,
            vec!["optimizer", "dynamic_generator", "static_graph", "default_path"]
        );
    }
}
