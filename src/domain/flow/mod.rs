//! Flow module - the adaptive question-flow engine.
//!
//! # Components
//!
//! - `FlowEngine` - start / answer / abandon state machine for one session
//! - `FlowSession` - history, answers and context of that session
//! - `ResolverStrategy` - ordered next-question strategies
//! - `AnswerSheet` - answers in the order they were given

mod answers;
mod engine;
mod errors;
mod resolver;
mod session;

pub use answers::{AnswerSheet, RecordedAnswer};
pub use engine::{CompletionReason, EngineSettings, FlowEngine, TurnOutcome};
pub use errors::FlowError;
pub use resolver::{resolve, Resolution, ResolutionInput, ResolverStrategy};
pub use session::{FlowSession, DEFAULT_MAX_QUESTIONS};
