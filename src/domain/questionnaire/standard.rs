//! The built-in onboarding questionnaire.
//!
//! Ten static questions, the flow edges for those plus the two generated
//! questions, and the linear fallback path.

use super::context::{ComplexityLevel, FamilyFocus, PartialContext, PreparednessLevel, UrgencyLevel};
use super::flow_graph::FlowEdge;
use super::generator::{CHILDREN_AGE_ID, QUICK_WIN_ID};
use super::question::{Question, QuestionKind};
use crate::domain::foundation::QuestionId;

pub const FAMILY_RELIANCE: &str = "family-reliance";
pub const SPOUSE_CHALLENGE: &str = "spouse-challenge";
pub const ORGANIZATION_STATUS: &str = "organization-status";
pub const ORGANIZATION_PRIORITY: &str = "organization-priority";
pub const DOCUMENT_TIMELINE: &str = "document-timeline";
pub const BUSINESS_STRUCTURE: &str = "business-structure";
pub const OPTIMIZATION_FOCUS: &str = "optimization-focus";
pub const FIRST_STEP: &str = "first-step";
pub const URGENCY_ASSESSMENT: &str = "urgency-assessment";
pub const CONFIDENCE_BUILDER: &str = "confidence-builder";

/// The question every session starts with.
pub const SEED_QUESTION: &str = FAMILY_RELIANCE;

fn q(id: &'static str) -> QuestionId {
    QuestionId::from_static(id)
}

fn to(id: &'static str) -> Option<QuestionId> {
    Some(q(id))
}

fn patch() -> PartialContext {
    PartialContext::new()
}

pub(crate) fn questions() -> Vec<Question> {
    vec![
        Question::new(
            q(FAMILY_RELIANCE),
            "When you think about your family's future, who depends on you the most?",
            QuestionKind::Primary,
        )
        .with_subtext("This helps us understand what matters most to you")
        .option("spouse-children", "My spouse and children rely on me for everything")
        .option("business-partners", "My business partners and employees count on me")
        .option("aging-parents", "I help care for aging parents or relatives")
        .option("self-focused", "It's mainly just me I need to plan for"),
        Question::new(
            q(SPOUSE_CHALLENGE),
            "If something happened to you tomorrow, what would be the hardest thing for your spouse to handle?",
            QuestionKind::Followup,
        )
        .with_subtext("We'll create a plan to make this easier")
        .with_category("family")
        .option("finances", "Understanding our finances and paying the bills")
        .option("legal-insurance", "Dealing with insurance claims and legal paperwork")
        .option("children-decisions", "Making important decisions about our children's future")
        .option("business-work", "Managing my business or work responsibilities"),
        Question::new(
            q(ORGANIZATION_STATUS),
            "How organized are your important documents right now?",
            QuestionKind::Primary,
        )
        .with_subtext("Be honest - we're here to help, not judge")
        .option("very-organized", "Everything is documented and easy to find")
        .option("somewhat-organized", "Most things are in place, but some gaps exist")
        .option("not-organized", "I'm not sure where everything is")
        .option("no-system", "There's no real system - it's all in my head"),
        Question::new(
            q(ORGANIZATION_PRIORITY),
            "What's the most important thing you need to get organized first?",
            QuestionKind::Followup,
        )
        .with_subtext("Let's start with what would make the biggest difference")
        .with_category("organization")
        .option("documents", "Important documents (insurance, legal papers)")
        .option("accounts", "Financial account information and passwords")
        .option("contacts", "Contact information for advisors and professionals")
        .option("instructions", "Instructions for handling emergencies"),
        Question::new(
            q(DOCUMENT_TIMELINE),
            "How much time do you think your family would need to find everything?",
            QuestionKind::Followup,
        )
        .with_subtext("This helps us understand the urgency")
        .with_category("organization")
        .option("hours", "A few hours if they knew where to look")
        .option("days", "Several days of searching through everything")
        .option("weeks", "Weeks or months to piece it all together")
        .option("never", "They might never find some important things"),
        Question::new(
            q(BUSINESS_STRUCTURE),
            "What's your role in the business?",
            QuestionKind::Followup,
        )
        .with_subtext("This helps us understand succession planning needs")
        .with_category("business")
        .option("sole-owner", "I'm the sole owner and decision maker")
        .option("majority-owner", "I'm the majority owner with partners")
        .option("equal-partner", "I'm an equal partner in the business")
        .option("key-employee", "I'm a key employee but not an owner"),
        Question::new(
            q(OPTIMIZATION_FOCUS),
            "What aspect of your planning would you like to strengthen?",
            QuestionKind::Contextual,
        )
        .with_subtext("Even good plans can be better")
        .with_category("advanced")
        .option("tax-efficiency", "Tax efficiency and wealth preservation")
        .option("business-continuity", "Business continuity planning")
        .option("family-communication", "Family preparation and communication")
        .option("scenario-planning", "Planning for unexpected scenarios"),
        Question::new(
            q(FIRST_STEP),
            "What feels like the most manageable first step?",
            QuestionKind::Contextual,
        )
        .with_subtext("Small steps lead to big progress")
        .with_category("basic")
        .option("list-accounts", "Make a list of all my accounts")
        .option("gather-documents", "Gather important documents in one place")
        .option("talk-spouse", "Have a conversation with my spouse")
        .option("find-advisor", "Find a trusted advisor to help"),
        Question::new(
            q(URGENCY_ASSESSMENT),
            "When do you want to have everything organized and protected?",
            QuestionKind::Contextual,
        )
        .with_subtext("There's no wrong answer - we'll work with your timeline")
        .with_category("planning")
        .option("asap", "As soon as possible - I've been putting this off")
        .option("months", "In the next few months - I want to do this right")
        .option("year", "Within the year - I'm planning ahead")
        .option("eventually", "Eventually - I'm just exploring options"),
        Question::new(
            q(CONFIDENCE_BUILDER),
            "What would give you the most peace of mind?",
            QuestionKind::Contextual,
        )
        .with_subtext("Let's focus on what will help you sleep better at night")
        .with_category("emotional")
        .option("family-prepared", "Knowing my family won't struggle if something happens")
        .option("everything-documented", "Having everything documented and easy to find")
        .option("professional-help", "Having professionals ready to help my family")
        .option("control-maintained", "Maintaining control over important decisions"),
    ]
}

pub(crate) fn edges() -> Vec<FlowEdge> {
    use ComplexityLevel as C;
    use FamilyFocus as F;
    use PreparednessLevel as P;
    use UrgencyLevel as U;

    vec![
        FlowEdge::new(q(FAMILY_RELIANCE))
            .branch(
                "spouse-children",
                to(SPOUSE_CHALLENGE),
                patch().family(F::Spouse).urgency(U::Immediate),
            )
            .branch(
                "business-partners",
                to(BUSINESS_STRUCTURE),
                patch().family(F::Business).complexity(C::Advanced),
            )
            .branch(
                "aging-parents",
                to(ORGANIZATION_STATUS),
                patch().family(F::Parents).urgency(U::Moderate),
            )
            .branch("self-focused", to(ORGANIZATION_STATUS), patch().urgency(U::Planning)),
        FlowEdge::new(q(SPOUSE_CHALLENGE))
            .branch("finances", to(ORGANIZATION_STATUS), patch().complexity(C::Intermediate))
            .branch(
                "legal-insurance",
                to(ORGANIZATION_STATUS),
                patch().complexity(C::Intermediate),
            )
            .branch("children-decisions", to(ORGANIZATION_STATUS), patch().family(F::Children))
            .branch(
                "business-work",
                to(BUSINESS_STRUCTURE),
                patch().family(F::Business).complexity(C::Advanced),
            ),
        FlowEdge::new(q(ORGANIZATION_STATUS))
            .branch("very-organized", to(OPTIMIZATION_FOCUS), patch().preparedness(P::High))
            .branch(
                "somewhat-organized",
                to(ORGANIZATION_PRIORITY),
                patch().preparedness(P::Medium),
            )
            .branch("not-organized", to(ORGANIZATION_PRIORITY), patch().preparedness(P::Low))
            .branch(
                "no-system",
                to(FIRST_STEP),
                patch().preparedness(P::Low).urgency(U::Immediate),
            ),
        FlowEdge::new(q(ORGANIZATION_PRIORITY))
            .branch("documents", to(DOCUMENT_TIMELINE), patch().complexity(C::Basic))
            .branch("accounts", to(DOCUMENT_TIMELINE), patch().complexity(C::Intermediate))
            .branch("contacts", to(DOCUMENT_TIMELINE), patch().complexity(C::Basic))
            .branch("instructions", to(DOCUMENT_TIMELINE), patch().urgency(U::Immediate)),
        FlowEdge::new(q(DOCUMENT_TIMELINE))
            .branch("hours", None, patch().preparedness(P::Medium))
            .branch("days", None, patch().preparedness(P::Low))
            .branch("weeks", None, patch().preparedness(P::Low).urgency(U::Immediate))
            .branch("never", None, patch().preparedness(P::Low).urgency(U::Immediate))
            .completes_on_any_answer(),
        FlowEdge::new(q(BUSINESS_STRUCTURE))
            .branch(
                "sole-owner",
                to(ORGANIZATION_STATUS),
                patch().complexity(C::Advanced).urgency(U::Immediate),
            )
            .branch("majority-owner", to(ORGANIZATION_STATUS), patch().complexity(C::Advanced))
            .branch(
                "equal-partner",
                to(ORGANIZATION_STATUS),
                patch().complexity(C::Intermediate),
            )
            .branch("key-employee", to(ORGANIZATION_STATUS), patch().complexity(C::Basic)),
        FlowEdge::new(q(OPTIMIZATION_FOCUS))
            .branch("tax-efficiency", None, patch().complexity(C::Advanced))
            .branch(
                "business-continuity",
                None,
                patch().complexity(C::Advanced).family(F::Business),
            )
            .branch("family-communication", None, patch().family(F::Spouse))
            .branch("scenario-planning", None, patch().complexity(C::Advanced))
            .completes_on_any_answer(),
        FlowEdge::new(q(FIRST_STEP))
            .branch("list-accounts", None, patch().complexity(C::Basic))
            .branch("gather-documents", None, patch().complexity(C::Basic))
            .branch("talk-spouse", None, patch().family(F::Spouse))
            .branch("find-advisor", None, patch().complexity(C::Intermediate))
            .completes_on_any_answer(),
        FlowEdge::new(q(URGENCY_ASSESSMENT))
            .branch("asap", to(CONFIDENCE_BUILDER), patch().urgency(U::Immediate))
            .branch("months", to(CONFIDENCE_BUILDER), patch().urgency(U::Moderate))
            .branch("year", to(CONFIDENCE_BUILDER), patch().urgency(U::Planning))
            .branch("eventually", to(CONFIDENCE_BUILDER), patch().urgency(U::Planning)),
        FlowEdge::new(q(CONFIDENCE_BUILDER))
            .branch("family-prepared", None, patch().family(F::Spouse))
            .branch("everything-documented", None, patch().complexity(C::Basic))
            .branch("professional-help", None, patch().complexity(C::Intermediate))
            .branch("control-maintained", None, patch().complexity(C::Advanced))
            .completes_on_any_answer(),
        FlowEdge::new(q(QUICK_WIN_ID))
            .branch("list-passwords", to(ORGANIZATION_PRIORITY), patch())
            .branch("find-documents", to(ORGANIZATION_PRIORITY), patch())
            .branch("talk-family", to(ORGANIZATION_PRIORITY), patch().family(F::Spouse))
            .branch(
                "call-advisor",
                to(ORGANIZATION_PRIORITY),
                patch().complexity(C::Intermediate),
            ),
        FlowEdge::new(q(CHILDREN_AGE_ID))
            .branch("young", to(ORGANIZATION_STATUS), patch().urgency(U::Immediate))
            .branch("teens", to(ORGANIZATION_STATUS), patch().complexity(C::Intermediate))
            .branch("adults", to(ORGANIZATION_STATUS), patch().urgency(U::Planning))
            .branch("mixed", to(ORGANIZATION_STATUS), patch().complexity(C::Intermediate)),
    ]
}

/// Fallback chain used when no other resolver produces a next question.
pub(crate) fn default_path() -> Vec<(QuestionId, QuestionId)> {
    vec![
        (q(FAMILY_RELIANCE), q(SPOUSE_CHALLENGE)),
        (q(SPOUSE_CHALLENGE), q(ORGANIZATION_STATUS)),
        (q(ORGANIZATION_STATUS), q(URGENCY_ASSESSMENT)),
        (q(URGENCY_ASSESSMENT), q(CONFIDENCE_BUILDER)),
    ]
}
