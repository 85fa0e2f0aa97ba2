//! Session state - everything one respondent's run accumulates.

use std::collections::HashMap;

use serde::Serialize;

use super::answers::AnswerSheet;
use crate::domain::foundation::{Percentage, QuestionId, SessionId, SessionStatus, Timestamp};
use crate::domain::questionnaire::{PartialContext, Question, RespondentContext};

/// Default cap on how many questions one session may show.
pub const DEFAULT_MAX_QUESTIONS: usize = 8;

/// Mutable state of a single questionnaire run.
///
/// # Invariants
///
/// - `history.len() <= max_questions`
/// - no id appears twice in `history`
/// - `current` is the last element of `history` while the session is active
#[derive(Debug, Clone, Serialize)]
pub struct FlowSession {
    id: SessionId,
    status: SessionStatus,
    current: Option<QuestionId>,
    history: Vec<QuestionId>,
    answers: AnswerSheet,
    context: RespondentContext,
    #[serde(skip)]
    injected: HashMap<QuestionId, Question>,
    max_questions: usize,
    created_at: Timestamp,
}

impl FlowSession {
    /// Creates a not-yet-started session with the given starting context.
    pub fn new(max_questions: usize, initial_context: RespondentContext) -> Self {
        Self {
            id: SessionId::new(),
            status: SessionStatus::NotStarted,
            current: None,
            history: Vec::new(),
            answers: AnswerSheet::new(),
            context: initial_context,
            injected: HashMap::new(),
            max_questions: max_questions.max(1),
            created_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current(&self) -> Option<&QuestionId> {
        self.current.as_ref()
    }

    /// Questions shown so far, in order, including the current one.
    pub fn history(&self) -> &[QuestionId] {
        &self.history
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn context(&self) -> &RespondentContext {
        &self.context
    }

    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Generated question stored for `id`, if one was injected.
    pub fn injected(&self, id: &str) -> Option<&Question> {
        self.injected.get(id)
    }

    pub fn has_visited(&self, id: &str) -> bool {
        self.history.iter().any(|visited| *visited == *id)
    }

    /// True once the history has reached the configured maximum.
    pub fn history_full(&self) -> bool {
        self.history.len() >= self.max_questions
    }

    /// `min(history / max, 1.0)`.
    pub fn progress(&self) -> f64 {
        (self.history.len() as f64 / self.max_questions as f64).min(1.0)
    }

    pub fn progress_percent(&self) -> Percentage {
        Percentage::from_fraction(self.progress())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (driven by the engine)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    pub(crate) fn record_answer(&mut self, question_id: QuestionId, value: String) {
        self.answers.record(question_id, value);
    }

    pub(crate) fn apply_patch(&mut self, patch: &PartialContext) {
        self.context = self.context.merge(patch);
    }

    /// Moves to `id`, appending it to the history.
    ///
    /// Returns false and changes nothing if `id` was already visited or the
    /// history is full.
    pub(crate) fn navigate_to(&mut self, id: QuestionId) -> bool {
        if self.has_visited(id.as_str()) || self.history_full() {
            return false;
        }
        self.history.push(id.clone());
        self.current = Some(id);
        true
    }

    pub(crate) fn inject(&mut self, question: Question) {
        self.injected.insert(question.id.clone(), question);
    }
}
