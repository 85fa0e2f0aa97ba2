//! Question catalog - immutable id → question lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionKind};
use crate::domain::foundation::{QuestionId, ValidationError};

/// Immutable set of questions keyed by id.
///
/// Built once from a list of questions; duplicate ids are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionCatalog {
    questions: BTreeMap<QuestionId, Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, validating each question.
    ///
    /// # Errors
    ///
    /// - Any error from [`Question::validate`]
    /// - `InvalidFormat` if two questions share an id
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        let mut map = BTreeMap::new();
        for question in questions {
            question.validate()?;
            let id = question.id.clone();
            if map.insert(id.clone(), question).is_some() {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate question id '{}'", id),
                ));
            }
        }
        Ok(Self { questions: map })
    }

    /// Looks up a question by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.questions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterates questions ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    /// Questions of one kind, ordered by id.
    pub fn of_kind(&self, kind: QuestionKind) -> Vec<&Question> {
        self.iter().filter(|q| q.kind == kind).collect()
    }
}

impl TryFrom<Vec<Question>> for QuestionCatalog {
    type Error = ValidationError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<QuestionCatalog> for Vec<Question> {
    fn from(catalog: QuestionCatalog) -> Self {
        catalog.questions.into_values().collect()
    }
}
