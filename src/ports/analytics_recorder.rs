//! AnalyticsRecorder port - Interface for recording flow usage events.
//!
//! The flow engine reports what respondents see and answer through this
//! port; metrics are derived later from the recorded log.

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::{QuestionId, SessionId};
use crate::domain::questionnaire::RespondentContext;

/// Port for recording analytics events.
///
/// Implementations must ensure:
/// - Recording never returns an error; events are side effects only.
///   An implementation may still panic on an unrecoverable internal fault,
///   such as a poisoned lock
/// - Concurrent sessions may record through one shared instance
/// - View start times are scoped per `(session, question)`
/// - `events` returns a consistent snapshot, even while recording continues
pub trait AnalyticsRecorder: Send + Sync {
    /// Record that a question was shown and remember when.
    fn track_question_view(&self, session_id: SessionId, question_id: &QuestionId);

    /// Record an answer, with the time since the matching view if known.
    fn track_answer(
        &self,
        session_id: SessionId,
        question_id: &QuestionId,
        value: &str,
        context: &RespondentContext,
    );

    /// Record a completed session with its full path and final context.
    fn track_completion(
        &self,
        session_id: SessionId,
        path: &[QuestionId],
        context: &RespondentContext,
    );

    /// Record a session given up at `question_id`.
    fn track_abandonment(&self, session_id: SessionId, question_id: &QuestionId, path: &[QuestionId]);

    /// Snapshot of every event recorded so far, in recording order.
    fn events(&self) -> Vec<AnalyticsEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn AnalyticsRecorder) {}

    #[test]
    fn analytics_recorder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn AnalyticsRecorder>();
    }
}
