//! Respondent context - the typed profile accumulated across a session.
//!
//! Every answer may carry a [`PartialContext`] patch. Patches are merged
//! with a shallow overwrite: keys present in the patch replace the current
//! value, absent keys are left alone. Because every field is a closed enum,
//! a merged context can never hold an out-of-set value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Generates the shared boilerplate for a closed context enum:
/// `all()`, `as_str()`, `Display` and `FromStr`.
macro_rules! context_level {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Returns every variant in declaration order.
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// Returns the wire name of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ValidationError::invalid_format(
                        $field,
                        format!("unknown value '{}'", other),
                    )),
                }
            }
        }
    };
}

/// How prepared the respondent already is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreparednessLevel {
    High,
    #[default]
    Medium,
    Low,
}

context_level!(PreparednessLevel, "preparedness_level", {
    High => "high",
    Medium => "medium",
    Low => "low",
});

/// Who the respondent is mainly planning for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FamilyFocus {
    #[default]
    Spouse,
    Children,
    Parents,
    Business,
}

context_level!(FamilyFocus, "family_focus", {
    Spouse => "spouse",
    Children => "children",
    Parents => "parents",
    Business => "business",
});

/// How soon the respondent wants to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Immediate,
    #[default]
    Moderate,
    Planning,
}

context_level!(UrgencyLevel, "urgency_level", {
    Immediate => "immediate",
    Moderate => "moderate",
    Planning => "planning",
});

/// How involved the respondent's affairs are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

context_level!(ComplexityLevel, "complexity_level", {
    Basic => "basic",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

/// The four context fields, used to address a field generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKey {
    PreparednessLevel,
    FamilyFocus,
    UrgencyLevel,
    ComplexityLevel,
}

impl ContextKey {
    /// All keys in declaration order.
    pub fn all() -> &'static [ContextKey] {
        &[
            ContextKey::PreparednessLevel,
            ContextKey::FamilyFocus,
            ContextKey::UrgencyLevel,
            ContextKey::ComplexityLevel,
        ]
    }
}

/// The accumulated respondent profile.
///
/// Starts at `{medium, spouse, moderate, basic}` and only changes through
/// [`RespondentContext::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RespondentContext {
    pub preparedness_level: PreparednessLevel,
    pub family_focus: FamilyFocus,
    pub urgency_level: UrgencyLevel,
    pub complexity_level: ComplexityLevel,
}

impl RespondentContext {
    /// Returns a new context with the patch's declared keys overwritten.
    #[must_use]
    pub fn merge(&self, patch: &PartialContext) -> Self {
        Self {
            preparedness_level: patch.preparedness_level.unwrap_or(self.preparedness_level),
            family_focus: patch.family_focus.unwrap_or(self.family_focus),
            urgency_level: patch.urgency_level.unwrap_or(self.urgency_level),
            complexity_level: patch.complexity_level.unwrap_or(self.complexity_level),
        }
    }

    /// Returns the context's value for `key` in wire form.
    pub fn value_of(&self, key: ContextKey) -> &'static str {
        match key {
            ContextKey::PreparednessLevel => self.preparedness_level.as_str(),
            ContextKey::FamilyFocus => self.family_focus.as_str(),
            ContextKey::UrgencyLevel => self.urgency_level.as_str(),
            ContextKey::ComplexityLevel => self.complexity_level.as_str(),
        }
    }
}

/// A context with any subset of keys set.
///
/// Used both as the patch attached to an answer and as the target
/// pattern of an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PartialContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparedness_level: Option<PreparednessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_focus: Option<FamilyFocus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_level: Option<ComplexityLevel>,
}

impl PartialContext {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preparedness(mut self, level: PreparednessLevel) -> Self {
        self.preparedness_level = Some(level);
        self
    }

    pub fn family(mut self, focus: FamilyFocus) -> Self {
        self.family_focus = Some(focus);
        self
    }

    pub fn urgency(mut self, level: UrgencyLevel) -> Self {
        self.urgency_level = Some(level);
        self
    }

    pub fn complexity(mut self, level: ComplexityLevel) -> Self {
        self.complexity_level = Some(level);
        self
    }

    /// Returns true if no key is set.
    pub fn is_empty(&self) -> bool {
        self.declared_keys().is_empty()
    }

    /// Keys this partial context sets, in declaration order.
    pub fn declared_keys(&self) -> Vec<ContextKey> {
        ContextKey::all()
            .iter()
            .copied()
            .filter(|key| self.value_of(*key).is_some())
            .collect()
    }

    /// Returns the declared value for `key` in wire form, if any.
    pub fn value_of(&self, key: ContextKey) -> Option<&'static str> {
        match key {
            ContextKey::PreparednessLevel => self.preparedness_level.map(|v| v.as_str()),
            ContextKey::FamilyFocus => self.family_focus.map(|v| v.as_str()),
            ContextKey::UrgencyLevel => self.urgency_level.map(|v| v.as_str()),
            ContextKey::ComplexityLevel => self.complexity_level.map(|v| v.as_str()),
        }
    }

    /// Fraction of declared keys whose value equals the context's value.
    ///
    /// An empty pattern matches nothing and yields `0.0`.
    pub fn match_ratio(&self, context: &RespondentContext) -> f64 {
        let keys = self.declared_keys();
        if keys.is_empty() {
            return 0.0;
        }
        let matching = keys
            .iter()
            .filter(|key| self.value_of(**key) == Some(context.value_of(**key)))
            .count();
        matching as f64 / keys.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod defaults {
        use super::*;

        #[test]
        fn default_context_is_medium_spouse_moderate_basic() {
            let ctx = RespondentContext::default();
            assert_eq!(ctx.preparedness_level, PreparednessLevel::Medium);
            assert_eq!(ctx.family_focus, FamilyFocus::Spouse);
            assert_eq!(ctx.urgency_level, UrgencyLevel::Moderate);
            assert_eq!(ctx.complexity_level, ComplexityLevel::Basic);
        }

        #[test]
        fn default_patch_is_empty() {
            assert!(PartialContext::default().is_empty());
        }
    }

    mod merge {
        use super::*;

        #[test]
        fn merge_overwrites_only_declared_keys() {
            let ctx = RespondentContext::default();
            let patch = PartialContext::new()
                .family(FamilyFocus::Spouse)
                .urgency(UrgencyLevel::Immediate);

            let merged = ctx.merge(&patch);

            assert_eq!(merged.urgency_level, UrgencyLevel::Immediate);
            assert_eq!(merged.preparedness_level, PreparednessLevel::Medium);
            assert_eq!(merged.complexity_level, ComplexityLevel::Basic);
        }

        #[test]
        fn later_patch_wins_for_shared_keys() {
            let ctx = RespondentContext::default()
                .merge(&PartialContext::new().complexity(ComplexityLevel::Advanced))
                .merge(&PartialContext::new().complexity(ComplexityLevel::Intermediate));
            assert_eq!(ctx.complexity_level, ComplexityLevel::Intermediate);
        }

        #[test]
        fn empty_patch_is_identity() {
            let ctx = RespondentContext::default()
                .merge(&PartialContext::new().preparedness(PreparednessLevel::Low));
            assert_eq!(ctx.merge(&PartialContext::new()), ctx);
        }

        #[test]
        fn merge_does_not_mutate_original() {
            let original = RespondentContext::default();
            let _ = original.merge(&PartialContext::new().family(FamilyFocus::Business));
            assert_eq!(original.family_focus, FamilyFocus::Spouse);
        }
    }

    mod match_ratio {
        use super::*;

        #[test]
        fn three_of_four_keys_is_three_quarters() {
            let pattern = PartialContext::new()
                .preparedness(PreparednessLevel::Low)
                .family(FamilyFocus::Spouse)
                .urgency(UrgencyLevel::Immediate)
                .complexity(ComplexityLevel::Basic);
            let ctx = RespondentContext {
                preparedness_level: PreparednessLevel::Low,
                family_focus: FamilyFocus::Spouse,
                urgency_level: UrgencyLevel::Immediate,
                complexity_level: ComplexityLevel::Advanced,
            };
            assert!((pattern.match_ratio(&ctx) - 0.75).abs() < f64::EPSILON);
        }

        #[test]
        fn partial_pattern_only_counts_declared_keys() {
            let pattern = PartialContext::new().family(FamilyFocus::Business);
            let ctx = RespondentContext::default()
                .merge(&PartialContext::new().family(FamilyFocus::Business));
            assert!((pattern.match_ratio(&ctx) - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn empty_pattern_never_matches() {
            assert_eq!(
                PartialContext::new().match_ratio(&RespondentContext::default()),
                0.0
            );
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn levels_parse_from_their_wire_names() {
            for level in PreparednessLevel::all() {
                assert_eq!(level.as_str().parse::<PreparednessLevel>().unwrap(), *level);
            }
            for focus in FamilyFocus::all() {
                assert_eq!(focus.as_str().parse::<FamilyFocus>().unwrap(), *focus);
            }
        }

        #[test]
        fn unknown_level_is_rejected() {
            let err = "extreme".parse::<UrgencyLevel>().unwrap_err();
            assert!(err.to_string().contains("urgency_level"));
        }

        #[test]
        fn patch_serializes_only_declared_keys() {
            let patch = PartialContext::new().urgency(UrgencyLevel::Planning);
            let json = serde_json::to_string(&patch).unwrap();
            assert_eq!(json, r#"{"urgency_level":"planning"}"#);
        }

        #[test]
        fn patch_rejects_out_of_set_values() {
            let result: Result<PartialContext, _> =
                serde_json::from_str(r#"{"family_focus":"cousins"}"#);
            assert!(result.is_err());
        }
    }
}
