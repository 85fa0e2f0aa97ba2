//! Dynamic question generator.
//!
//! Injects questions that are not part of the static catalog when the
//! respondent's context matches a known pattern. The generator is a pure
//! function of `(context, answers)`: the same inputs always produce the
//! same question, and it never proposes a question that was already answered.

use super::context::{FamilyFocus, PreparednessLevel, RespondentContext, UrgencyLevel};
use super::question::{Question, QuestionKind};
use crate::domain::flow::AnswerSheet;
use crate::domain::foundation::QuestionId;

/// Id of the action-oriented question for unprepared, urgent respondents.
pub const QUICK_WIN_ID: &str = "quick-win";

/// Id of the follow-up asked once a respondent focuses on their children.
pub const CHILDREN_AGE_ID: &str = "children-age";

/// Stateless generator of context-triggered questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicQuestionGenerator;

impl DynamicQuestionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Ids this generator can ever produce.
    pub fn known_ids() -> &'static [&'static str] {
        &[QUICK_WIN_ID, CHILDREN_AGE_ID]
    }

    /// Returns the question to inject for this turn, if any.
    ///
    /// Rules, first match wins:
    /// 1. low preparedness + immediate urgency → `quick-win`
    /// 2. children focus and `children-age` not answered → `children-age`
    /// 3. otherwise nothing
    ///
    /// A rule whose question was already answered yields nothing rather
    /// than falling through to the next rule.
    pub fn generate(&self, context: &RespondentContext, answers: &AnswerSheet) -> Option<Question> {
        let candidate = if context.preparedness_level == PreparednessLevel::Low
            && context.urgency_level == UrgencyLevel::Immediate
        {
            quick_win_question()
        } else if context.family_focus == FamilyFocus::Children {
            children_age_question()
        } else {
            return None;
        };

        if answers.contains(candidate.id.as_str()) {
            None
        } else {
            Some(candidate)
        }
    }

    /// Returns the definition of a generated question by id.
    pub fn question_by_id(id: &str) -> Option<Question> {
        match id {
            QUICK_WIN_ID => Some(quick_win_question()),
            CHILDREN_AGE_ID => Some(children_age_question()),
            _ => None,
        }
    }
}

fn quick_win_question() -> Question {
    Question::new(
        QuestionId::from_static(QUICK_WIN_ID),
        "Let's start small. What can you do this week?",
        QuestionKind::Contextual,
    )
    .with_subtext("Small steps lead to big results")
    .with_category("action")
    .option("list-passwords", "Write down my important passwords")
    .option("find-documents", "Gather my important documents")
    .option("talk-family", "Talk to my family about my wishes")
    .option("call-advisor", "Schedule a call with an advisor")
}

fn children_age_question() -> Question {
    Question::new(
        QuestionId::from_static(CHILDREN_AGE_ID),
        "How old are your children?",
        QuestionKind::Contextual,
    )
    .with_subtext("This helps us tailor our recommendations")
    .with_category("family")
    .option("young", "Under 10 - they still need everything")
    .option("teens", "Teenagers - planning for college soon")
    .option("adults", "Adults - but I still worry about them")
    .option("mixed", "Different ages - each with different needs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::context::PartialContext;

    fn ctx(patch: PartialContext) -> RespondentContext {
        RespondentContext::default().merge(&patch)
    }

    fn answered(id: &str, value: &str) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId::new(id).unwrap(), value.to_string());
        sheet
    }

    #[test]
    fn low_and_immediate_yields_quick_win() {
        let context = ctx(
            PartialContext::new()
                .preparedness(PreparednessLevel::Low)
                .urgency(UrgencyLevel::Immediate),
        );
        let q = DynamicQuestionGenerator::new()
            .generate(&context, &AnswerSheet::new())
            .unwrap();
        assert_eq!(q.id, QUICK_WIN_ID);
    }

    #[test]
    fn quick_win_takes_priority_over_children_age() {
        let context = ctx(
            PartialContext::new()
                .preparedness(PreparednessLevel::Low)
                .urgency(UrgencyLevel::Immediate)
                .family(FamilyFocus::Children),
        );
        let q = DynamicQuestionGenerator::new()
            .generate(&context, &AnswerSheet::new())
            .unwrap();
        assert_eq!(q.id, QUICK_WIN_ID);
    }

    #[test]
    fn children_focus_yields_children_age_until_answered() {
        let context = ctx(PartialContext::new().family(FamilyFocus::Children));
        let generator = DynamicQuestionGenerator::new();

        let q = generator.generate(&context, &AnswerSheet::new()).unwrap();
        assert_eq!(q.id, CHILDREN_AGE_ID);

        assert!(generator
            .generate(&context, &answered(CHILDREN_AGE_ID, "teens"))
            .is_none());
    }

    #[test]
    fn answered_quick_win_is_not_proposed_again() {
        let context = ctx(
            PartialContext::new()
                .preparedness(PreparednessLevel::Low)
                .urgency(UrgencyLevel::Immediate),
        );
        assert!(DynamicQuestionGenerator::new()
            .generate(&context, &answered(QUICK_WIN_ID, "talk-family"))
            .is_none());
    }

    #[test]
    fn default_context_yields_nothing() {
        assert!(DynamicQuestionGenerator::new()
            .generate(&RespondentContext::default(), &AnswerSheet::new())
            .is_none());
    }

    #[test]
    fn generation_is_idempotent() {
        let context = ctx(PartialContext::new().family(FamilyFocus::Children));
        let answers = answered("family-reliance", "spouse-children");
        let generator = DynamicQuestionGenerator::new();
        assert_eq!(
            generator.generate(&context, &answers),
            generator.generate(&context, &answers)
        );
    }

    #[test]
    fn generated_questions_are_well_formed() {
        for id in DynamicQuestionGenerator::known_ids() {
            let q = DynamicQuestionGenerator::question_by_id(id).unwrap();
            assert!(q.validate().is_ok());
            assert_eq!(q.kind, QuestionKind::Contextual);
        }
    }
}
