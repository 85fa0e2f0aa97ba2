//! Application layer - analytics queries over recorded flow sessions.
//!
//! The flow engine itself lives in the domain; this layer wires the
//! recorder port to the pure metrics and optimizer code.

mod flow_analytics_service;

pub use flow_analytics_service::FlowAnalyticsService;
