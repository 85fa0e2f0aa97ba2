//! Question and answer option value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{QuestionId, ValidationError};

/// Role a question plays in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Core question every respondent is likely to see.
    Primary,
    /// Drill-down that follows a specific primary answer.
    Followup,
    /// Shown only when the accumulated context calls for it.
    Contextual,
}

impl QuestionKind {
    /// Returns the label shown under the question.
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionKind::Primary => "Core Question",
            QuestionKind::Followup => "Follow-up Question",
            QuestionKind::Contextual => "Contextual Question",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
}

impl AnswerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An immutable question definition.
///
/// # Invariants
///
/// - `text` is non-empty
/// - `options` is non-empty and option values are unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Creates a question with no options yet; add them with [`Question::option`].
    pub fn new(id: QuestionId, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            subtext: None,
            kind,
            category: None,
            options: Vec::new(),
        }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Appends an answer option.
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(AnswerOption::new(value, label));
        self
    }

    /// Returns true if `value` is one of this question's option values.
    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Option values in display order.
    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }

    /// Checks the structural invariants.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text or option list is empty
    /// - `InvalidFormat` if two options share a value
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.text", self.id)));
        }
        if self.options.is_empty() {
            return Err(ValidationError::empty_field(format!("{}.options", self.id)));
        }
        for (idx, option) in self.options.iter().enumerate() {
            if option.value.trim().is_empty() {
                return Err(ValidationError::empty_field(format!(
                    "{}.options[{}].value",
                    self.id, idx
                )));
            }
            if self.options[..idx].iter().any(|o| o.value == option.value) {
                return Err(ValidationError::invalid_format(
                    format!("{}.options", self.id),
                    format!("duplicate option value '{}'", option.value),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            QuestionId::new("pets").unwrap(),
            "Do you have pets?",
            QuestionKind::Contextual,
        )
        .with_category("family")
        .option("yes", "Yes")
        .option("no", "No")
    }

    #[test]
    fn accepts_only_declared_values() {
        let q = sample();
        assert!(q.accepts("yes"));
        assert!(!q.accepts("maybe"));
    }

    #[test]
    fn validate_passes_for_well_formed_question() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_options() {
        let q = Question::new(QuestionId::new("empty").unwrap(), "Text", QuestionKind::Primary);
        assert!(matches!(q.validate(), Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn validate_rejects_duplicate_values() {
        let q = sample().option("yes", "Yes again");
        assert!(matches!(q.validate(), Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(QuestionKind::Primary.to_string(), "Core Question");
        assert_eq!(QuestionKind::Contextual.to_string(), "Contextual Question");
    }

    #[test]
    fn optional_fields_are_omitted_when_serialized() {
        let q = Question::new(QuestionId::new("q").unwrap(), "Q?", QuestionKind::Primary)
            .option("a", "A");
        let json = serde_json::to_value(&q).unwrap();
        assert!(json.get("subtext").is_none());
        assert!(json.get("category").is_none());
        assert_eq!(json["kind"], "primary");
    }
}
