//! Questionnaire module - what can be asked and how answers branch.
//!
//! # Components
//!
//! - `RespondentContext` / `PartialContext` - the typed profile and its patches
//! - `Question` / `QuestionCatalog` - immutable question definitions
//! - `FlowEdge` / `FlowGraph` - answer → next question, patch, completion
//! - `DynamicQuestionGenerator` - context-triggered extra questions
//! - `FlowDefinition` - the bundle the engine runs, built in or from YAML

mod catalog;
mod context;
mod definition;
mod flow_graph;
mod generator;
mod insights;
mod question;
pub mod standard;

pub use catalog::QuestionCatalog;
pub use context::{
    ComplexityLevel, ContextKey, FamilyFocus, PartialContext, PreparednessLevel,
    RespondentContext, UrgencyLevel,
};
pub use definition::{DefinitionError, FlowDefinition};
pub use flow_graph::{FlowEdge, FlowGraph};
pub use generator::{DynamicQuestionGenerator, CHILDREN_AGE_ID, QUICK_WIN_ID};
pub use insights::{insight_for, progress_message};
pub use question::{AnswerOption, Question, QuestionKind};
