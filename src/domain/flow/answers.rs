//! Answer sheet - the answers given so far, in answer order.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::QuestionId;

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub question_id: QuestionId,
    pub value: String,
}

/// Question id → chosen value, iterated in the order answers were given.
///
/// Recording an answer for a question that already has one replaces the
/// value in place and keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: Vec<RecordedAnswer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the answer for a question.
    pub fn record(&mut self, question_id: QuestionId, value: String) {
        match self.answers.iter_mut().find(|a| a.question_id == question_id) {
            Some(existing) => existing.value = value,
            None => self.answers.push(RecordedAnswer { question_id, value }),
        }
    }

    /// The value chosen for a question, if answered.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.question_id == *question_id)
            .map(|a| a.value.as_str())
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.get(question_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answers in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = &RecordedAnswer> {
        self.answers.iter()
    }

    /// The most recent answer.
    pub fn last(&self) -> Option<&RecordedAnswer> {
        self.answers.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(id: &str) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    #[test]
    fn preserves_answer_order() {
        let mut sheet = AnswerSheet::new();
        sheet.record(qid("b"), "1".into());
        sheet.record(qid("a"), "2".into());

        let order: Vec<&str> = sheet.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn re_recording_replaces_in_place() {
        let mut sheet = AnswerSheet::new();
        sheet.record(qid("a"), "old".into());
        sheet.record(qid("b"), "x".into());
        sheet.record(qid("a"), "new".into());

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.get("a"), Some("new"));
        assert_eq!(sheet.iter().next().unwrap().question_id, "a");
    }

    #[test]
    fn lookup_of_unanswered_question_is_none() {
        assert!(AnswerSheet::new().get("a").is_none());
        assert!(!AnswerSheet::new().contains("a"));
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut sheet = AnswerSheet::new();
        sheet.record(qid("family-reliance"), "self-focused".into());
        let json = serde_json::to_string(&sheet).unwrap();
        assert_eq!(
            json,
            r#"[{"question_id":"family-reliance","value":"self-focused"}]"#
        );
    }
}
