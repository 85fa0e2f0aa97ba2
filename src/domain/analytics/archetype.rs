//! Archetype classifier - named respondent profiles and their usual paths.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::{
    standard, ComplexityLevel, FamilyFocus, PartialContext, PreparednessLevel,
    RespondentContext, UrgencyLevel,
};

/// A named cluster of respondents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub description: String,
    /// Partial target context; only declared keys count when matching.
    pub pattern: PartialContext,
    /// Completed paths typical for this archetype, most typical first.
    pub common_paths: Vec<Vec<QuestionId>>,
}

impl Archetype {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        pattern: PartialContext,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            pattern,
            common_paths: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: &[&'static str]) -> Self {
        self.common_paths
            .push(path.iter().copied().map(QuestionId::from_static).collect());
        self
    }

    /// Share of the pattern's declared keys that `context` satisfies.
    pub fn match_ratio(&self, context: &RespondentContext) -> f64 {
        self.pattern.match_ratio(context)
    }

    /// True if `context` satisfies at least `threshold` of the pattern.
    pub fn matches(&self, context: &RespondentContext, threshold: f64) -> bool {
        self.match_ratio(context) >= threshold
    }

    /// The most typical completed path, if any is known.
    pub fn primary_path(&self) -> Option<&[QuestionId]> {
        self.common_paths.first().map(Vec::as_slice)
    }
}

/// Ordered list of archetypes. Order matters: live classification picks the
/// first match, not the best one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeCatalog {
    archetypes: Vec<Archetype>,
}

impl ArchetypeCatalog {
    pub fn new(archetypes: Vec<Archetype>) -> Self {
        Self { archetypes }
    }

    /// The four canonical onboarding archetypes.
    pub fn standard() -> Self {
        Self::new(vec![
            Archetype::new(
                "Prepared Family Man",
                "Organized individual focused on family protection",
                PartialContext::new()
                    .preparedness(PreparednessLevel::High)
                    .family(FamilyFocus::Spouse)
                    .urgency(UrgencyLevel::Planning)
                    .complexity(ComplexityLevel::Intermediate),
            )
            .with_path(&[
                standard::FAMILY_RELIANCE,
                standard::SPOUSE_CHALLENGE,
                standard::ORGANIZATION_STATUS,
                standard::OPTIMIZATION_FOCUS,
            ]),
            Archetype::new(
                "Business Owner Seeking Structure",
                "Business-focused individual needing better organization",
                PartialContext::new()
                    .preparedness(PreparednessLevel::Low)
                    .family(FamilyFocus::Business)
                    .urgency(UrgencyLevel::Immediate)
                    .complexity(ComplexityLevel::Advanced),
            )
            .with_path(&[
                standard::FAMILY_RELIANCE,
                standard::BUSINESS_STRUCTURE,
                standard::ORGANIZATION_STATUS,
                standard::FIRST_STEP,
            ]),
            Archetype::new(
                "Overwhelmed Provider",
                "Family provider who knows they need help getting organized",
                PartialContext::new()
                    .preparedness(PreparednessLevel::Low)
                    .family(FamilyFocus::Spouse)
                    .urgency(UrgencyLevel::Immediate)
                    .complexity(ComplexityLevel::Basic),
            )
            .with_path(&[
                standard::FAMILY_RELIANCE,
                standard::SPOUSE_CHALLENGE,
                standard::ORGANIZATION_STATUS,
                standard::FIRST_STEP,
            ]),
            Archetype::new(
                "Solo Planner",
                "Individual focused on personal preparation",
                PartialContext::new()
                    .preparedness(PreparednessLevel::Medium)
                    .family(FamilyFocus::Spouse)
                    .urgency(UrgencyLevel::Planning)
                    .complexity(ComplexityLevel::Basic),
            )
            .with_path(&[
                standard::FAMILY_RELIANCE,
                standard::ORGANIZATION_STATUS,
                standard::ORGANIZATION_PRIORITY,
                standard::DOCUMENT_TIMELINE,
            ]),
        ])
    }

    /// First archetype, in declared order, matching at `threshold` or above.
    pub fn first_match(&self, context: &RespondentContext, threshold: f64) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.matches(context, threshold))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}
