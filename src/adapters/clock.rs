//! Clock implementations.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to, for deterministic elapsed times.
///
/// # Example
///
/// ```ignore
/// let clock = Arc::new(ManualClock::at_unix_millis(0));
/// let recorder = InMemoryAnalyticsRecorder::with_clock(clock.clone());
/// recorder.track_question_view(session, &question);
/// clock.advance_millis(1_500);
/// recorder.track_answer(session, &question, "yes", &context); // 1500 ms
/// ```
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn at_unix_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance_millis(&self, millis: u64) {
        let delta = i64::try_from(millis).unwrap_or(i64::MAX);
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn set(&self, timestamp: Timestamp) {
        self.millis.store(timestamp.as_unix_millis(), Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at_unix_millis(0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_millis(self.millis.load(Ordering::SeqCst))
    }
}
