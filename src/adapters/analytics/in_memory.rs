//! In-memory analytics recorder.
//!
//! Keeps the event log and view start times in process memory. One
//! instance is shared by every engine that should report into the same
//! metrics; tests usually create one per test.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::adapters::clock::SystemClock;
use crate::domain::analytics::{AnalyticsEvent, EventKind};
use crate::domain::foundation::{QuestionId, SessionId, Timestamp};
use crate::domain::questionnaire::RespondentContext;
use crate::ports::{AnalyticsRecorder, Clock};

/// Append-only analytics log held in memory.
///
/// View start times are keyed by `(session, question)`, so concurrent
/// sessions viewing the same question do not overwrite each other. A start
/// time is dropped once its answer is recorded, and a session's leftovers
/// are dropped when it completes or is abandoned.
///
/// Completion and abandonment elapsed times are measured from the moment
/// the recorder was created.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned, which only happens if
/// another thread panicked while recording.
pub struct InMemoryAnalyticsRecorder {
    clock: Arc<dyn Clock>,
    created_at: Timestamp,
    events: RwLock<Vec<AnalyticsEvent>>,
    view_started: RwLock<HashMap<(SessionId, QuestionId), Timestamp>>,
}

impl InMemoryAnalyticsRecorder {
    /// Creates a recorder using wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a recorder reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let created_at = clock.now();
        Self {
            clock,
            created_at,
            events: RwLock::new(Vec::new()),
            view_started: RwLock::new(HashMap::new()),
        }
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // === Test Helpers ===

    /// Number of recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn event_count(&self) -> usize {
        self.events
            .read()
            .expect("InMemoryAnalyticsRecorder: events lock poisoned")
            .len()
    }

    /// Recorded events of one kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<AnalyticsEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.kind() == kind)
            .collect()
    }

    /// Recorded events of one session.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn events_for_session(&self, session_id: SessionId) -> Vec<AnalyticsEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.session_id() == session_id)
            .collect()
    }

    /// Number of views still waiting for an answer.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn pending_view_count(&self) -> usize {
        self.view_started
            .read()
            .expect("InMemoryAnalyticsRecorder: view lock poisoned")
            .len()
    }

    /// Drops every recorded event and view start time.
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned.
    pub fn clear(&self) {
        self.events
            .write()
            .expect("InMemoryAnalyticsRecorder: events write lock poisoned")
            .clear();
        self.view_started
            .write()
            .expect("InMemoryAnalyticsRecorder: view lock poisoned")
            .clear();
    }

    fn push(&self, event: AnalyticsEvent) {
        trace!(kind = ?event.kind(), session_id = %event.session_id(), "Recording analytics event");
        self.events
            .write()
            .expect("InMemoryAnalyticsRecorder: events write lock poisoned")
            .push(event);
    }

    fn elapsed_since_creation(&self, now: &Timestamp) -> u64 {
        now.millis_since(&self.created_at)
    }

    fn forget_session(&self, session_id: SessionId) {
        self.view_started
            .write()
            .expect("InMemoryAnalyticsRecorder: view lock poisoned")
            .retain(|(session, _), _| *session != session_id);
    }
}

impl Default for InMemoryAnalyticsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsRecorder for InMemoryAnalyticsRecorder {
    fn track_question_view(&self, session_id: SessionId, question_id: &QuestionId) {
        let now = self.clock.now();
        self.view_started
            .write()
            .expect("InMemoryAnalyticsRecorder: view lock poisoned")
            .insert((session_id, question_id.clone()), now);
        self.push(AnalyticsEvent::View {
            session_id,
            question_id: question_id.clone(),
            timestamp: now,
        });
    }

    fn track_answer(
        &self,
        session_id: SessionId,
        question_id: &QuestionId,
        value: &str,
        context: &RespondentContext,
    ) {
        let now = self.clock.now();
        let time_spent_ms = self
            .view_started
            .write()
            .expect("InMemoryAnalyticsRecorder: view lock poisoned")
            .remove(&(session_id, question_id.clone()))
            .map(|started| now.millis_since(&started));
        self.push(AnalyticsEvent::Answer {
            session_id,
            question_id: question_id.clone(),
            value: value.to_string(),
            context: *context,
            time_spent_ms,
            timestamp: now,
        });
    }

    fn track_completion(
        &self,
        session_id: SessionId,
        path: &[QuestionId],
        context: &RespondentContext,
    ) {
        let now = self.clock.now();
        self.forget_session(session_id);
        self.push(AnalyticsEvent::Completion {
            session_id,
            path: path.to_vec(),
            context: *context,
            elapsed_ms: self.elapsed_since_creation(&now),
            timestamp: now,
        });
    }

    fn track_abandonment(&self, session_id: SessionId, question_id: &QuestionId, path: &[QuestionId]) {
        let now = self.clock.now();
        self.forget_session(session_id);
        self.push(AnalyticsEvent::Abandonment {
            session_id,
            question_id: question_id.clone(),
            path: path.to_vec(),
            elapsed_ms: self.elapsed_since_creation(&now),
            timestamp: now,
        });
    }

    fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .read()
            .expect("InMemoryAnalyticsRecorder: events lock poisoned")
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    fn recorder() -> (Arc<ManualClock>, InMemoryAnalyticsRecorder) {
        let clock = Arc::new(ManualClock::at_unix_millis(10_000));
        let recorder = InMemoryAnalyticsRecorder::with_clock(clock.clone());
        (clock, recorder)
    }

    fn time_spent(event: &AnalyticsEvent) -> Option<u64> {
        match event {
            AnalyticsEvent::Answer { time_spent_ms, .. } => *time_spent_ms,
            other => panic!("expected answer event, got {:?}", other),
        }
    }

    #[test]
    fn answer_time_is_measured_from_matching_view() {
        let (clock, recorder) = recorder();
        let session = SessionId::new();
        let q = qid("family-reliance");

        recorder.track_question_view(session, &q);
        clock.advance_millis(1_500);
        recorder.track_answer(session, &q, "self-focused", &RespondentContext::default());

        let answers = recorder.events_of_kind(EventKind::Answer);
        assert_eq!(time_spent(&answers[0]), Some(1_500));
    }

    #[test]
    fn answer_without_view_has_no_time() {
        let (_, recorder) = recorder();
        recorder.track_answer(
            SessionId::new(),
            &qid("family-reliance"),
            "self-focused",
            &RespondentContext::default(),
        );
        assert_eq!(time_spent(&recorder.events()[0]), None);
    }

    #[test]
    fn view_times_are_scoped_per_session() {
        let (clock, recorder) = recorder();
        let first = SessionId::new();
        let second = SessionId::new();
        let q = qid("family-reliance");

        recorder.track_question_view(first, &q);
        clock.advance_millis(4_000);
        recorder.track_question_view(second, &q);
        clock.advance_millis(1_000);
        recorder.track_answer(first, &q, "self-focused", &RespondentContext::default());

        assert_eq!(time_spent(&recorder.events_for_session(first)[1]), Some(5_000));
    }

    #[test]
    fn answering_releases_the_view_time() {
        let (_, recorder) = recorder();
        let session = SessionId::new();
        let q = qid("family-reliance");

        recorder.track_question_view(session, &q);
        assert_eq!(recorder.pending_view_count(), 1);
        recorder.track_answer(session, &q, "self-focused", &RespondentContext::default());

        assert_eq!(recorder.pending_view_count(), 0);
    }

    #[test]
    fn ending_a_session_drops_only_its_view_times() {
        let (_, recorder) = recorder();
        let finished = SessionId::new();
        let abandoned = SessionId::new();
        let running = SessionId::new();
        for session in [finished, abandoned, running] {
            recorder.track_question_view(session, &qid("family-reliance"));
        }

        recorder.track_completion(finished, &[qid("family-reliance")], &RespondentContext::default());
        recorder.track_abandonment(abandoned, &qid("family-reliance"), &[qid("family-reliance")]);

        assert_eq!(recorder.pending_view_count(), 1);
        recorder.track_answer(
            running,
            &qid("family-reliance"),
            "self-focused",
            &RespondentContext::default(),
        );
        assert_eq!(recorder.pending_view_count(), 0);
    }

    #[test]
    fn recording_out_of_order_still_succeeds() {
        let (_, recorder) = recorder();
        let session = SessionId::new();

        recorder.track_abandonment(session, &qid("spouse-challenge"), &[]);
        recorder.track_completion(session, &[], &RespondentContext::default());
        recorder.track_answer(session, &qid("never-shown"), "x", &RespondentContext::default());

        assert_eq!(recorder.event_count(), 3);
        assert_eq!(recorder.pending_view_count(), 0);
    }

    #[test]
    fn completion_elapsed_is_measured_from_creation() {
        let (clock, recorder) = recorder();
        clock.advance_millis(9_000);
        recorder.track_completion(
            SessionId::new(),
            &[qid("family-reliance")],
            &RespondentContext::default(),
        );

        match &recorder.events()[0] {
            AnalyticsEvent::Completion { elapsed_ms, path, .. } => {
                assert_eq!(*elapsed_ms, 9_000);
                assert_eq!(path.len(), 1);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn abandonment_records_question_and_path() {
        let (clock, recorder) = recorder();
        clock.advance_millis(300);
        recorder.track_abandonment(
            SessionId::new(),
            &qid("spouse-challenge"),
            &[qid("family-reliance"), qid("spouse-challenge")],
        );

        match &recorder.events()[0] {
            AnalyticsEvent::Abandonment { question_id, path, elapsed_ms, .. } => {
                assert_eq!(question_id, "spouse-challenge");
                assert_eq!(path.len(), 2);
                assert_eq!(*elapsed_ms, 300);
            }
            other => panic!("expected abandonment, got {:?}", other),
        }
    }

    #[test]
    fn snapshot_is_independent_of_later_recording() {
        let (_, recorder) = recorder();
        let session = SessionId::new();
        recorder.track_question_view(session, &qid("a"));
        let snapshot = recorder.events();
        recorder.track_question_view(session, &qid("b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(recorder.event_count(), 2);
    }

    #[test]
    fn clear_empties_the_log() {
        let (_, recorder) = recorder();
        recorder.track_question_view(SessionId::new(), &qid("a"));
        recorder.clear();
        assert_eq!(recorder.event_count(), 0);
    }
}
