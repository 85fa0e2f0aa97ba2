//! Flow engine configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::flow::{EngineSettings, DEFAULT_MAX_QUESTIONS};

/// Flow engine configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FlowConfig {
    /// Number of questions after which a session completes
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// YAML flow definition to load instead of the built-in questionnaire
    #[serde(default)]
    pub definition_path: Option<PathBuf>,
}

impl FlowConfig {
    /// Engine settings derived from this configuration
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            max_questions: self.max_questions,
        }
    }

    /// Validate flow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_questions == 0 {
            return Err(ValidationError::InvalidMaxQuestions);
        }
        if let Some(path) = &self.definition_path {
            if !path.is_file() {
                return Err(ValidationError::DefinitionNotFound(
                    path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
            definition_path: None,
        }
    }
}

fn default_max_questions() -> usize {
    DEFAULT_MAX_QUESTIONS
}
