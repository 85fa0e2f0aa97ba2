//! Analytics module - usage events, metrics and archetype-driven optimization.
//!
//! Everything here is pure: metrics are derived from an event snapshot and
//! the optimizer only reads context, history and metrics. Recording lives
//! behind the `AnalyticsRecorder` port.

mod archetype;
mod events;
mod metrics;
mod optimizer;

pub use archetype::{Archetype, ArchetypeCatalog};
pub use events::{AnalyticsEvent, EventKind};
pub use metrics::{ArchetypeShare, DropOffPoint, FlowMetrics, MetricsPolicy};
pub use optimizer::{FlowOptimizer, OptimizationSuggestion, Severity, SuggestionKind};
