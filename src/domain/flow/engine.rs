//! Flow engine - drives one respondent session through a flow definition.
//!
//! Each `submit_answer` call fully resolves the next state before it
//! returns: record the answer, merge its context patch, report it, then
//! either complete or resolve and show the next question.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::answers::AnswerSheet;
use super::errors::FlowError;
use super::resolver::{resolve, ResolutionInput, ResolverStrategy};
use super::session::{FlowSession, DEFAULT_MAX_QUESTIONS};
use crate::domain::analytics::FlowOptimizer;
use crate::domain::foundation::{
    Percentage, QuestionId, SessionId, SessionStatus, StateMachine,
};
use crate::domain::questionnaire::{
    insight_for, progress_message, FlowDefinition, PartialContext, Question, RespondentContext,
};
use crate::ports::{AnalyticsRecorder, FlowObserver};

/// Per-engine limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// History length at which the session completes; at least 1.
    pub max_questions: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }
}

/// Why a session completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// The answer carries a force-completion flag.
    Forced,
    /// The history reached the configured maximum.
    HistoryLimit,
    /// No strategy produced an unvisited question.
    NoNextQuestion,
}

/// Result of a successful `submit_answer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    Advanced {
        next: QuestionId,
        /// Name of the resolver strategy that chose `next`.
        strategy: &'static str,
        progress: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        insight: Option<&'static str>,
    },
    Completed {
        reason: CompletionReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        insight: Option<&'static str>,
    },
}

impl TurnOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }

    /// Reassurance message for the answer just given, if any.
    pub fn insight(&self) -> Option<&'static str> {
        match self {
            TurnOutcome::Advanced { insight, .. } | TurnOutcome::Completed { insight, .. } => {
                *insight
            }
        }
    }
}

/// State machine for a single questionnaire session.
///
/// # Example
///
/// ```ignore
/// let mut engine = FlowEngine::new(FlowDefinition::standard(), EngineSettings::default())
///     .with_recorder(recorder.clone())
///     .with_optimizer(FlowOptimizer::default());
///
/// engine.start()?;
/// while let TurnOutcome::Advanced { .. } = engine.submit_answer(next_answer())? {}
/// ```
pub struct FlowEngine {
    definition: Arc<FlowDefinition>,
    strategies: Vec<ResolverStrategy>,
    recorder: Option<Arc<dyn AnalyticsRecorder>>,
    observer: Option<Arc<dyn FlowObserver>>,
    session: FlowSession,
}

impl FlowEngine {
    /// Creates an engine with the generator, graph and default-path
    /// strategies. Add the optimizer with [`with_optimizer`](Self::with_optimizer).
    pub fn new(definition: Arc<FlowDefinition>, settings: EngineSettings) -> Self {
        Self {
            definition,
            strategies: ResolverStrategy::fallback_chain(),
            recorder: None,
            observer: None,
            session: FlowSession::new(settings.max_questions, RespondentContext::default()),
        }
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn AnalyticsRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn FlowObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Puts the optimizer in front of every other strategy, replacing any
    /// optimizer already installed.
    pub fn with_optimizer(mut self, optimizer: FlowOptimizer) -> Self {
        self.strategies
            .retain(|s| !matches!(s, ResolverStrategy::Optimizer(_)));
        self.strategies
            .insert(0, ResolverStrategy::Optimizer(optimizer));
        self
    }

    /// Applies a patch over the default starting context.
    ///
    /// Ignored once the session has started.
    pub fn with_initial_context(mut self, patch: PartialContext) -> Self {
        if self.session.status() == SessionStatus::NotStarted {
            self.session.apply_patch(&patch);
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    pub fn session(&self) -> &FlowSession {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn is_complete(&self) -> bool {
        self.session.status() == SessionStatus::Completed
    }

    pub fn context(&self) -> &RespondentContext {
        self.session.context()
    }

    pub fn answers(&self) -> &AnswerSheet {
        self.session.answers()
    }

    pub fn history(&self) -> &[QuestionId] {
        self.session.history()
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    /// Names of the installed strategies, in resolution order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(ResolverStrategy::name).collect()
    }

    /// The question currently shown.
    ///
    /// Generated questions are stored on the session; everything else
    /// comes from the catalog.
    pub fn current_question(&self) -> Option<&Question> {
        let id = self.session.current()?;
        self.session
            .injected(id.as_str())
            .or_else(|| self.definition.catalog().get(id.as_str()))
    }

    /// `min(history / max_questions, 1.0)`.
    pub fn progress(&self) -> f64 {
        self.session.progress()
    }

    pub fn progress_percent(&self) -> Percentage {
        self.session.progress_percent()
    }

    /// Encouragement text for the current stage of the session.
    pub fn progress_message(&self) -> &'static str {
        progress_message(self.session.history().len())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts the session at the definition's seed question.
    ///
    /// # Errors
    ///
    /// - `AlreadyStarted` if the session is active
    /// - `SessionClosed` if it already completed or was abandoned
    pub fn start(&mut self) -> Result<&Question, FlowError> {
        match self.session.status() {
            SessionStatus::NotStarted => {}
            SessionStatus::Active => return Err(FlowError::AlreadyStarted),
            closed => return Err(FlowError::SessionClosed(closed)),
        }

        let seed = self.definition.seed().clone();
        if !self.definition.catalog().contains(seed.as_str()) {
            error!(question_id = %seed, "Seed question is missing from the catalog");
            return Err(FlowError::UnknownQuestion(seed));
        }

        self.transition(SessionStatus::Active)?;
        self.session.navigate_to(seed.clone());
        debug!(
            session_id = %self.session.id(),
            question_id = %seed,
            "Session started"
        );
        self.announce(&seed);

        self.current_question()
            .ok_or(FlowError::UnknownQuestion(seed))
    }

    /// Answers the current question and moves the session forward.
    ///
    /// # Errors
    ///
    /// - `NotStarted` / `SessionClosed` outside an active session
    /// - `InvalidAnswer` if `value` is not an option of the current question
    /// - `MissingFlowEdge` if the current question has no flow edge; the
    ///   session is left exactly as it was
    ///
    /// No error leaves a partial change behind.
    pub fn submit_answer(&mut self, value: &str) -> Result<TurnOutcome, FlowError> {
        self.ensure_active()?;
        let current = self.session.current().cloned().ok_or(FlowError::NotStarted)?;
        let session_id = self.session.id();

        let question = self
            .current_question()
            .ok_or_else(|| FlowError::UnknownQuestion(current.clone()))?;
        if !question.accepts(value) {
            warn!(
                session_id = %session_id,
                question_id = %current,
                answer = value,
                "Rejected answer outside the question's options"
            );
            return Err(FlowError::invalid_answer(current, value));
        }

        let Some(edge) = self.definition.edge(current.as_str()) else {
            error!(
                session_id = %session_id,
                question_id = %current,
                "No flow edge for current question; session paused"
            );
            return Err(FlowError::MissingFlowEdge(current));
        };
        let patch = edge.patch_for(value).copied();
        let forced = edge.forces_completion(value);

        self.session.record_answer(current.clone(), value.to_string());
        if let Some(patch) = patch {
            self.session.apply_patch(&patch);
        }
        if let Some(recorder) = &self.recorder {
            recorder.track_answer(session_id, &current, value, self.session.context());
        }
        debug!(
            session_id = %session_id,
            question_id = %current,
            answer = value,
            "Answer recorded"
        );

        let insight = insight_for(current.as_str(), value);

        if forced {
            return self.complete(CompletionReason::Forced, insight);
        }
        if self.session.history_full() {
            return self.complete(CompletionReason::HistoryLimit, insight);
        }

        let resolution = resolve(
            &self.strategies,
            &ResolutionInput {
                session_id,
                definition: &self.definition,
                context: self.session.context(),
                history: self.session.history(),
                answers: self.session.answers(),
                current: &current,
                answer: value,
            },
        );

        let Some(resolution) = resolution else {
            return self.complete(CompletionReason::NoNextQuestion, insight);
        };

        if let Some(question) = resolution.injected {
            self.session.inject(question);
        }
        if !self.session.navigate_to(resolution.question_id.clone()) {
            return self.complete(CompletionReason::NoNextQuestion, insight);
        }
        self.announce(&resolution.question_id);

        Ok(TurnOutcome::Advanced {
            next: resolution.question_id,
            strategy: resolution.strategy,
            progress: self.session.progress(),
            insight,
        })
    }

    /// Gives up on the session at the current question.
    ///
    /// Records an abandonment; the completion callback is not invoked.
    pub fn abandon(&mut self) -> Result<(), FlowError> {
        self.ensure_active()?;
        let current = self.session.current().cloned().ok_or(FlowError::NotStarted)?;

        self.transition(SessionStatus::Abandoned)?;
        if let Some(recorder) = &self.recorder {
            recorder.track_abandonment(self.session.id(), &current, self.session.history());
        }
        info!(
            session_id = %self.session.id(),
            question_id = %current,
            questions = self.session.history().len(),
            "Session abandoned"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_active(&self) -> Result<(), FlowError> {
        match self.session.status() {
            SessionStatus::Active => Ok(()),
            SessionStatus::NotStarted => Err(FlowError::NotStarted),
            closed => Err(FlowError::SessionClosed(closed)),
        }
    }

    fn transition(&mut self, target: SessionStatus) -> Result<(), FlowError> {
        let current = self.session.status();
        let next = current
            .transition_to(target)
            .map_err(|_| FlowError::SessionClosed(current))?;
        self.session.set_status(next);
        Ok(())
    }

    /// Reports a newly shown question.
    fn announce(&self, question_id: &QuestionId) {
        if let Some(recorder) = &self.recorder {
            recorder.track_question_view(self.session.id(), question_id);
        }
        if let Some(observer) = &self.observer {
            observer.on_progress(self.session.progress());
        }
    }

    fn complete(
        &mut self,
        reason: CompletionReason,
        insight: Option<&'static str>,
    ) -> Result<TurnOutcome, FlowError> {
        self.transition(SessionStatus::Completed)?;

        if let Some(recorder) = &self.recorder {
            recorder.track_completion(
                self.session.id(),
                self.session.history(),
                self.session.context(),
            );
        }
        info!(
            session_id = %self.session.id(),
            reason = ?reason,
            questions = self.session.history().len(),
            "Session completed"
        );
        if let Some(observer) = &self.observer {
            observer.on_complete(self.session.answers(), self.session.context());
        }

        Ok(TurnOutcome::Completed { reason, insight })
    }
}
