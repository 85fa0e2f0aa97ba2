//! Static flow graph - per-question branching rules.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::context::PartialContext;
use crate::domain::foundation::{QuestionId, ValidationError};

/// Branching rules for one question.
///
/// Each map is keyed by answer value. A `None` next-question marks the
/// answer as a dead end, which completes the session unless a later
/// resolver finds something to ask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub question_id: QuestionId,
    #[serde(default)]
    pub next: BTreeMap<String, Option<QuestionId>>,
    #[serde(default)]
    pub patches: BTreeMap<String, PartialContext>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub completion_triggers: BTreeMap<String, bool>,
}

impl FlowEdge {
    pub fn new(question_id: QuestionId) -> Self {
        Self {
            question_id,
            next: BTreeMap::new(),
            patches: BTreeMap::new(),
            completion_triggers: BTreeMap::new(),
        }
    }

    /// Adds a branch: answer → next question plus its context patch.
    pub fn branch(
        mut self,
        answer: impl Into<String>,
        next: Option<QuestionId>,
        patch: PartialContext,
    ) -> Self {
        let answer = answer.into();
        self.next.insert(answer.clone(), next);
        if !patch.is_empty() {
            self.patches.insert(answer, patch);
        }
        self
    }

    /// Marks every answer currently declared in `next` as force-completing.
    pub fn completes_on_any_answer(mut self) -> Self {
        for answer in self.next.keys() {
            self.completion_triggers.insert(answer.clone(), true);
        }
        self
    }

    /// Next question declared for `answer`, if any.
    pub fn next_for(&self, answer: &str) -> Option<&QuestionId> {
        self.next.get(answer).and_then(|next| next.as_ref())
    }

    /// Context patch declared for `answer`, if any.
    pub fn patch_for(&self, answer: &str) -> Option<&PartialContext> {
        self.patches.get(answer)
    }

    /// Returns true if `answer` ends the session regardless of graph edges.
    pub fn forces_completion(&self, answer: &str) -> bool {
        self.completion_triggers.get(answer).copied().unwrap_or(false)
    }

    /// Every answer value mentioned by any of the three maps.
    pub fn answer_keys(&self) -> impl Iterator<Item = &str> {
        self.next
            .keys()
            .chain(self.patches.keys())
            .chain(self.completion_triggers.keys())
            .map(String::as_str)
    }
}

/// All flow edges keyed by question id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "Vec<FlowEdge>", into = "Vec<FlowEdge>")]
pub struct FlowGraph {
    edges: HashMap<QuestionId, FlowEdge>,
}

impl FlowGraph {
    /// Builds a graph, rejecting two edges for the same question.
    pub fn new(edges: Vec<FlowEdge>) -> Result<Self, ValidationError> {
        let mut map = HashMap::with_capacity(edges.len());
        for edge in edges {
            let id = edge.question_id.clone();
            if map.insert(id.clone(), edge).is_some() {
                return Err(ValidationError::invalid_format(
                    "edges",
                    format!("duplicate flow edge for '{}'", id),
                ));
            }
        }
        Ok(Self { edges: map })
    }

    /// Looks up the edge for a question.
    pub fn edge(&self, question_id: &str) -> Option<&FlowEdge> {
        self.edges.get(question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.values()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl TryFrom<Vec<FlowEdge>> for FlowGraph {
    type Error = ValidationError;

    fn try_from(edges: Vec<FlowEdge>) -> Result<Self, Self::Error> {
        Self::new(edges)
    }
}

impl From<FlowGraph> for Vec<FlowEdge> {
    fn from(graph: FlowGraph) -> Self {
        let mut edges: Vec<FlowEdge> = graph.edges.into_values().collect();
        edges.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        edges
    }
}
