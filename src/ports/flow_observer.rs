//! FlowObserver port - Callbacks from the flow engine to its host.
//!
//! The engine does not persist anything itself. Completion hands the final
//! answers and context to the observer, which owns persistence.

use crate::domain::flow::AnswerSheet;
use crate::domain::questionnaire::RespondentContext;

/// Port for observing a session's progress and completion.
pub trait FlowObserver: Send + Sync {
    /// Called exactly once, when the session completes.
    ///
    /// Never called for abandoned sessions.
    fn on_complete(&self, answers: &AnswerSheet, context: &RespondentContext);

    /// Called after every navigation step with progress in `[0, 1]`.
    fn on_progress(&self, _progress: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CountingObserver {
        completions: Mutex<usize>,
    }

    impl FlowObserver for CountingObserver {
        fn on_complete(&self, _answers: &AnswerSheet, _context: &RespondentContext) {
            *self.completions.lock().unwrap() += 1;
        }
    }

    #[test]
    fn on_progress_defaults_to_no_op() {
        let observer = CountingObserver {
            completions: Mutex::new(0),
        };
        observer.on_progress(0.5);
        observer.on_complete(&AnswerSheet::new(), &RespondentContext::default());
        assert_eq!(*observer.completions.lock().unwrap(), 1);
    }
}
