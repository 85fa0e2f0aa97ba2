//! SessionStatus enum for tracking the lifecycle of a questionnaire session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a respondent's questionnaire session.
///
/// - `NotStarted`: engine built, `start()` not called yet
/// - `Active`: questions are being shown and answered
/// - `Completed`: terminal answer, history budget or exhausted resolvers
/// - `Abandoned`: closed by the caller before completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    NotStarted,
    Active,
    Completed,
    Abandoned,
}

impl SessionStatus {
    /// Returns true if answers can still be submitted.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Returns true once the session has been completed or abandoned.
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Abandoned)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (NotStarted, Active) | (Active, Completed) | (Active, Abandoned)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            NotStarted => vec![Active],
            Active => vec![Completed, Abandoned],
            Completed | Abandoned => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::NotStarted => "Not Started",
            SessionStatus::Active => "Active",
            SessionStatus::Completed => "Completed",
            SessionStatus::Abandoned => "Abandoned",
        };
        write!(f, "{}", s)
    }
}
