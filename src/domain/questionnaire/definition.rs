//! Flow definition - catalog, graph and fallback path bundled together.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::QuestionCatalog;
use super::flow_graph::{FlowEdge, FlowGraph};
use super::generator::DynamicQuestionGenerator;
use super::question::Question;
use super::standard;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, ValidationError};

static STANDARD: Lazy<Arc<FlowDefinition>> = Lazy::new(|| {
    Arc::new(FlowDefinition {
        seed: QuestionId::from_static(standard::SEED_QUESTION),
        catalog: QuestionCatalog::new(standard::questions())
            .expect("built-in questionnaire must be valid"),
        graph: FlowGraph::new(standard::edges()).expect("built-in flow edges must be unique"),
        default_path: standard::default_path().into_iter().collect(),
    })
});

/// Errors raised while loading a flow definition from YAML.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to read flow definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse flow definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid flow definition: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<DefinitionError> for DomainError {
    fn from(err: DefinitionError) -> Self {
        DomainError::new(ErrorCode::DefinitionLoadFailed, err.to_string())
    }
}

/// Everything the engine needs to know about one questionnaire.
///
/// # Invariants
///
/// - `seed` is a catalog question
/// - no catalog question reuses an id the dynamic generator produces
/// - every edge source, edge target and fallback id names a catalog
///   question or a generated question
/// - every answer key used by an edge is an option of its question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDefinition", into = "RawDefinition")]
pub struct FlowDefinition {
    seed: QuestionId,
    catalog: QuestionCatalog,
    graph: FlowGraph,
    default_path: BTreeMap<QuestionId, QuestionId>,
}

#[derive(Serialize, Deserialize)]
struct RawDefinition {
    seed: QuestionId,
    questions: QuestionCatalog,
    edges: FlowGraph,
    #[serde(default)]
    default_path: BTreeMap<QuestionId, QuestionId>,
}

impl TryFrom<RawDefinition> for FlowDefinition {
    type Error = ValidationError;

    fn try_from(raw: RawDefinition) -> Result<Self, Self::Error> {
        FlowDefinition::new(raw.seed, raw.questions, raw.edges, raw.default_path)
    }
}

impl From<FlowDefinition> for RawDefinition {
    fn from(def: FlowDefinition) -> Self {
        RawDefinition {
            seed: def.seed,
            questions: def.catalog,
            edges: def.graph,
            default_path: def.default_path,
        }
    }
}

impl FlowDefinition {
    /// Builds and validates a definition.
    ///
    /// # Errors
    ///
    /// - `UnknownReference` for a seed, edge or fallback id with no question
    /// - `InvalidFormat` for an edge keyed by an answer its question lacks,
    ///   or for a catalog question that takes a generated question's id
    pub fn new(
        seed: QuestionId,
        catalog: QuestionCatalog,
        graph: FlowGraph,
        default_path: BTreeMap<QuestionId, QuestionId>,
    ) -> Result<Self, ValidationError> {
        let def = Self {
            seed,
            catalog,
            graph,
            default_path,
        };
        def.validate()?;
        Ok(def)
    }

    /// The built-in onboarding questionnaire, shared process-wide.
    pub fn standard() -> Arc<FlowDefinition> {
        Arc::clone(&STANDARD)
    }

    /// Parses and validates a YAML definition.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DefinitionError> {
        let raw: RawDefinition = serde_yaml::from_str(yaml)?;
        Ok(Self::try_from(raw)?)
    }

    /// Reads, parses and validates a YAML definition file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serializes the definition back to YAML.
    pub fn to_yaml(&self) -> Result<String, DefinitionError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn seed(&self) -> &QuestionId {
        &self.seed
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    /// Flow edge for a question.
    pub fn edge(&self, question_id: &str) -> Option<&FlowEdge> {
        self.graph.edge(question_id)
    }

    /// Linear fallback successor of a question.
    pub fn default_next(&self, question_id: &str) -> Option<&QuestionId> {
        self.default_path.get(question_id)
    }

    /// Resolves a question from the catalog, falling back to the
    /// generator's definitions for ids the catalog does not have.
    pub fn question(&self, id: &str) -> Option<Question> {
        self.catalog
            .get(id)
            .cloned()
            .or_else(|| DynamicQuestionGenerator::question_by_id(id))
    }

    /// Catalog ids that are also produced by the dynamic generator.
    ///
    /// Always empty for a validated definition.
    pub fn dynamic_collisions(&self) -> Vec<&'static str> {
        DynamicQuestionGenerator::known_ids()
            .iter()
            .copied()
            .filter(|id| self.catalog.contains(id))
            .collect()
    }

    /// Catalog questions with no flow edge; answering one halts the session.
    pub fn questions_without_edges(&self) -> Vec<&QuestionId> {
        self.catalog
            .iter()
            .filter(|q| self.graph.edge(q.id.as_str()).is_none())
            .map(|q| &q.id)
            .collect()
    }

    fn is_known(&self, id: &str) -> bool {
        self.catalog.contains(id)
            || DynamicQuestionGenerator::known_ids()
                .iter()
                .any(|known| *known == id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.catalog.contains(self.seed.as_str()) {
            return Err(ValidationError::unknown_reference("seed", self.seed.as_str()));
        }

        if let Some(id) = self.dynamic_collisions().first() {
            return Err(ValidationError::invalid_format(
                format!("questions.{}", id),
                "id is reserved for a generated question",
            ));
        }

        for edge in self.graph.iter() {
            let source = edge.question_id.as_str();
            let question = self
                .question(source)
                .ok_or_else(|| ValidationError::unknown_reference("edges", source))?;

            for answer in edge.answer_keys() {
                if !question.accepts(answer) {
                    return Err(ValidationError::invalid_format(
                        format!("edges.{}", source),
                        format!("'{}' is not an option of this question", answer),
                    ));
                }
            }

            for target in edge.next.values().flatten() {
                if !self.is_known(target.as_str()) {
                    return Err(ValidationError::unknown_reference(
                        format!("edges.{}.next", source),
                        target.as_str(),
                    ));
                }
            }
        }

        for (from, to) in &self.default_path {
            for id in [from, to] {
                if !self.is_known(id.as_str()) {
                    return Err(ValidationError::unknown_reference("default_path", id.as_str()));
                }
            }
        }

        Ok(())
    }
}
