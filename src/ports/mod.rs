//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the flow domain and the outside world. Adapters implement these ports.
//!
//! - `AnalyticsRecorder` - Append-only log of views, answers and outcomes
//! - `Clock` - Source of the current time for elapsed-time measurement
//! - `FlowObserver` - Completion and progress callbacks to the host

mod analytics_recorder;
mod clock;
mod flow_observer;

pub use analytics_recorder::AnalyticsRecorder;
pub use clock::Clock;
pub use flow_observer::FlowObserver;
