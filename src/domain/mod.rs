//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, lifecycle)
//! - `questionnaire` - Questions, flow graph, context model and definitions
//! - `flow` - The adaptive flow engine and its session state
//! - `analytics` - Events, metrics, archetypes and the flow optimizer

pub mod analytics;
pub mod flow;
pub mod foundation;
pub mod questionnaire;
