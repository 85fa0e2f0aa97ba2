//! Analytics events recorded while respondents move through a flow.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, SessionId, Timestamp};
use crate::domain::questionnaire::RespondentContext;

/// Discriminant of an [`AnalyticsEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    View,
    Answer,
    Completion,
    Abandonment,
}

/// One entry of the append-only analytics log.
///
/// Every event carries the session it belongs to, so concurrent sessions
/// sharing a recorder stay distinguishable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    View {
        session_id: SessionId,
        question_id: QuestionId,
        timestamp: Timestamp,
    },
    Answer {
        session_id: SessionId,
        question_id: QuestionId,
        value: String,
        context: RespondentContext,
        /// Milliseconds since the matching view; absent without one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_spent_ms: Option<u64>,
        timestamp: Timestamp,
    },
    Completion {
        session_id: SessionId,
        path: Vec<QuestionId>,
        context: RespondentContext,
        elapsed_ms: u64,
        timestamp: Timestamp,
    },
    Abandonment {
        session_id: SessionId,
        question_id: QuestionId,
        path: Vec<QuestionId>,
        elapsed_ms: u64,
        timestamp: Timestamp,
    },
}

impl AnalyticsEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AnalyticsEvent::View { .. } => EventKind::View,
            AnalyticsEvent::Answer { .. } => EventKind::Answer,
            AnalyticsEvent::Completion { .. } => EventKind::Completion,
            AnalyticsEvent::Abandonment { .. } => EventKind::Abandonment,
        }
    }

    pub fn session_id(&self) -> SessionId {
        match self {
            AnalyticsEvent::View { session_id, .. }
            | AnalyticsEvent::Answer { session_id, .. }
            | AnalyticsEvent::Completion { session_id, .. }
            | AnalyticsEvent::Abandonment { session_id, .. } => *session_id,
        }
    }

    /// The question the event is about.
    ///
    /// Completions report the last question of their path.
    pub fn question_id(&self) -> Option<&QuestionId> {
        match self {
            AnalyticsEvent::View { question_id, .. }
            | AnalyticsEvent::Answer { question_id, .. }
            | AnalyticsEvent::Abandonment { question_id, .. } => Some(question_id),
            AnalyticsEvent::Completion { path, .. } => path.last(),
        }
    }

    pub fn timestamp(&self) -> &Timestamp {
        match self {
            AnalyticsEvent::View { timestamp, .. }
            | AnalyticsEvent::Answer { timestamp, .. }
            | AnalyticsEvent::Completion { timestamp, .. }
            | AnalyticsEvent::Abandonment { timestamp, .. } => timestamp,
        }
    }

    pub fn is_view_of(&self, id: &str) -> bool {
        matches!(self, AnalyticsEvent::View { question_id, .. } if *question_id == *id)
    }
}
