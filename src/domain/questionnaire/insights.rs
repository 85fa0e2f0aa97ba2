//! Reassurance copy shown between questions.

use super::standard::{ORGANIZATION_STATUS, SPOUSE_CHALLENGE};

/// Short message acknowledging a specific answer, if one is defined.
pub fn insight_for(question_id: &str, answer: &str) -> Option<&'static str> {
    let text = match (question_id, answer) {
        (SPOUSE_CHALLENGE, "finances") => {
            "You're not alone - 60% of spouses struggle with financial decisions after loss."
        }
        (SPOUSE_CHALLENGE, "legal-insurance") => {
            "Smart thinking - having clear documentation saves months of stress."
        }
        (SPOUSE_CHALLENGE, "children-decisions") => {
            "Protecting your children's future is what great parents do."
        }
        (SPOUSE_CHALLENGE, "business-work") => "Your business legacy deserves protection too.",
        (ORGANIZATION_STATUS, "very-organized") => {
            "Excellent! Let's make your good system even better."
        }
        (ORGANIZATION_STATUS, "somewhat-organized") => {
            "You're ahead of most people - let's fill those gaps."
        }
        (ORGANIZATION_STATUS, "not-organized") => {
            "Recognizing this is the first step to peace of mind."
        }
        (ORGANIZATION_STATUS, "no-system") => {
            "Many successful people are in the same boat - we'll fix this together."
        }
        _ => return None,
    };
    Some(text)
}

/// Encouragement keyed to how many questions have been shown.
pub fn progress_message(questions_shown: usize) -> &'static str {
    match questions_shown {
        0..=2 => "Getting to know your situation...",
        3..=4 => "Understanding your priorities...",
        5..=6 => "Almost there...",
        _ => "Final details...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_answer_has_insight() {
        assert!(insight_for("organization-status", "no-system")
            .unwrap()
            .contains("same boat"));
    }

    #[test]
    fn unknown_pair_has_no_insight() {
        assert!(insight_for("family-reliance", "spouse-children").is_none());
        assert!(insight_for("spouse-challenge", "nonsense").is_none());
    }

    #[test]
    fn progress_message_stages() {
        assert_eq!(progress_message(1), "Getting to know your situation...");
        assert_eq!(progress_message(2), "Getting to know your situation...");
        assert_eq!(progress_message(4), "Understanding your priorities...");
        assert_eq!(progress_message(6), "Almost there...");
        assert_eq!(progress_message(8), "Final details...");
    }
}
