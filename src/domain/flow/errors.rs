//! Flow engine error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SessionStatus};

/// Errors returned by [`FlowEngine`](super::FlowEngine) operations.
///
/// None of these leave the session half-updated: an operation that fails
/// has made no change to the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("Session has not been started")]
    NotStarted,

    #[error("Session has already been started")]
    AlreadyStarted,

    #[error("Session is {0} and no longer accepts changes")]
    SessionClosed(SessionStatus),

    #[error("'{value}' is not an option of question '{question_id}'")]
    InvalidAnswer { question_id: QuestionId, value: String },

    /// Catalog and graph disagree: the current question has no flow edge.
    #[error("No flow edge defined for question '{0}'")]
    MissingFlowEdge(QuestionId),

    #[error("Question '{0}' is not defined")]
    UnknownQuestion(QuestionId),
}

impl FlowError {
    pub fn invalid_answer(question_id: QuestionId, value: impl Into<String>) -> Self {
        FlowError::InvalidAnswer {
            question_id,
            value: value.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::NotStarted => ErrorCode::SessionNotStarted,
            FlowError::AlreadyStarted => ErrorCode::InvalidStateTransition,
            FlowError::SessionClosed(_) => ErrorCode::SessionClosed,
            FlowError::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            FlowError::MissingFlowEdge(_) => ErrorCode::FlowEdgeMissing,
            FlowError::UnknownQuestion(_) => ErrorCode::QuestionNotFound,
        }
    }

    /// True for catalog/graph inconsistencies that need a definition fix
    /// rather than a different answer from the respondent.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, FlowError::MissingFlowEdge(_) | FlowError::UnknownQuestion(_))
    }
}

impl From<FlowError> for DomainError {
    fn from(err: FlowError) -> Self {
        let code = err.code();
        let domain = DomainError::new(code, err.to_string());
        match err {
            FlowError::InvalidAnswer { question_id, value } => domain
                .with_detail("question_id", question_id.as_str())
                .with_detail("value", value),
            FlowError::MissingFlowEdge(id) | FlowError::UnknownQuestion(id) => {
                domain.with_detail("question_id", id.as_str())
            }
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    #[test]
    fn invalid_answer_message_names_question_and_value() {
        let err = FlowError::invalid_answer(qid("family-reliance"), "maybe");
        assert_eq!(
            err.to_string(),
            "'maybe' is not an option of question 'family-reliance'"
        );
        assert_eq!(err.code(), ErrorCode::InvalidAnswer);
    }

    #[test]
    fn closed_session_message_names_status() {
        let err = FlowError::SessionClosed(SessionStatus::Completed);
        assert_eq!(
            err.to_string(),
            "Session is Completed and no longer accepts changes"
        );
    }

    #[test]
    fn missing_edge_is_a_data_integrity_error() {
        assert!(FlowError::MissingFlowEdge(qid("x")).is_data_integrity());
        assert!(!FlowError::NotStarted.is_data_integrity());
    }

    #[test]
    fn converts_to_domain_error_with_details() {
        let domain: DomainError = FlowError::MissingFlowEdge(qid("orphan")).into();
        assert_eq!(domain.code, ErrorCode::FlowEdgeMissing);
        assert_eq!(domain.details.get("question_id"), Some(&"orphan".to_string()));
    }
}
