//! Adapters - Implementations of port interfaces.
//!
//! - `analytics` - Analytics recorder implementations (in-memory)
//! - `clock` - System and manually driven clocks

pub mod analytics;
pub mod clock;

pub use analytics::InMemoryAnalyticsRecorder;
pub use clock::{ManualClock, SystemClock};
