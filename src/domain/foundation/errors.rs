//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("'{reference}' referenced by '{field}' is not defined")]
    UnknownReference { field: String, reference: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an error for a dangling reference inside a definition.
    pub fn unknown_reference(field: impl Into<String>, reference: impl Into<String>) -> Self {
        ValidationError::UnknownReference {
            field: field.into(),
            reference: reference.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,
    InvalidAnswer,

    // Not found errors
    QuestionNotFound,
    FlowEdgeMissing,

    // State errors
    InvalidStateTransition,
    SessionNotStarted,
    SessionClosed,

    // Infrastructure errors
    DefinitionLoadFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidAnswer => "INVALID_ANSWER",
            ErrorCode::QuestionNotFound => "QUESTION_NOT_FOUND",
            ErrorCode::FlowEdgeMissing => "FLOW_EDGE_MISSING",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SessionNotStarted => "SESSION_NOT_STARTED",
            ErrorCode::SessionClosed => "SESSION_CLOSED",
            ErrorCode::DefinitionLoadFailed => "DEFINITION_LOAD_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::UnknownReference { .. } => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("question_id");
        assert_eq!(format!("{}", err), "Field 'question_id' cannot be empty");
    }

    #[test]
    fn validation_error_unknown_reference_displays_correctly() {
        let err = ValidationError::unknown_reference("edges.first-step", "nowhere");
        assert_eq!(
            format!("{}", err),
            "'nowhere' referenced by 'edges.first-step' is not defined"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::FlowEdgeMissing, "No flow edge for first-step");
        assert_eq!(
            format!("{}", err),
            "[FLOW_EDGE_MISSING] No flow edge for first-step"
        );
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::InvalidAnswer, "Invalid answer")
            .with_detail("question_id", "family-reliance")
            .with_detail("value", "maybe");

        assert_eq!(
            err.details.get("question_id"),
            Some(&"family-reliance".to_string())
        );
        assert_eq!(err.details.get("value"), Some(&"maybe".to_string()));
    }

    #[test]
    fn domain_error_from_validation_error_keeps_category() {
        let err: DomainError = ValidationError::invalid_format("kind", "unknown").into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        let err: DomainError = ValidationError::unknown_reference("seed", "nowhere").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
