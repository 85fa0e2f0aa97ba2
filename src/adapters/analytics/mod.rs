//! Analytics recorder adapters.

mod in_memory;

pub use in_memory::InMemoryAnalyticsRecorder;
