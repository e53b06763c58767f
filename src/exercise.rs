use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Single choice among the listed options.
    MultipleChoice,
    /// Single choice between "True" and "False".
    TrueFalse,
    /// Free text.
    ShortAnswer,
}

/// One question of the practice test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    /// Answer key. Kept for authors; responses are not scored against it.
    pub answer: String,
}

impl Question {
    /// Choices rendered as radio buttons; empty for short answers.
    pub fn choices(&self) -> Vec<String> {
        match self.kind {
            QuestionKind::MultipleChoice => self.options.clone(),
            QuestionKind::TrueFalse => vec!["True".to_string(), "False".to_string()],
            QuestionKind::ShortAnswer => Vec::new(),
        }
    }
}

/// The fixed question set of the Exercise section.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            kind: QuestionKind::MultipleChoice,
            prompt: "Which is the correct value?".to_string(),
            options: ["A", "B", "C", "D"].map(str::to_string).to_vec(),
            answer: "A".to_string(),
        },
        Question {
            id: 2,
            kind: QuestionKind::TrueFalse,
            prompt: "True or False sample.".to_string(),
            options: Vec::new(),
            answer: "True".to_string(),
        },
        Question {
            id: 3,
            kind: QuestionKind::ShortAnswer,
            prompt: "Explain briefly...".to_string(),
            options: Vec::new(),
            answer: String::new(),
        },
    ]
}

/// Learner answers keyed by question id. The latest answer per question wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Responses {
    answers: BTreeMap<u32, String>,
}

impl Responses {
    pub fn record(&mut self, question_id: u32, answer: impl Into<String>) {
        self.answers.insert(question_id, answer.into());
    }

    pub fn get(&self, question_id: u32) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Raw response map as shown on submit, e.g. `{"1":"A","3":"because"}`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.answers).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn submission_summary(&self) -> String {
        format!("Student responses: {}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_set_covers_every_kind() {
        let questions = sample_questions();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(questions[0].choices(), vec!["A", "B", "C", "D"]);
        assert_eq!(questions[1].choices(), vec!["True", "False"]);
        assert!(questions[2].choices().is_empty());
    }

    #[test]
    fn last_choice_wins() {
        let mut responses = Responses::default();

        responses.record(1, "B");
        responses.record(1, "C");

        assert_eq!(responses.get(1), Some("C"));
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn submission_is_not_scored() {
        let mut responses = Responses::default();
        responses.record(1, "D");
        responses.record(2, "False");
        responses.record(3, "because 2x");

        assert_eq!(
            responses.submission_summary(),
            r#"Student responses: {"1":"D","2":"False","3":"because 2x"}"#
        );
    }

    #[test]
    fn empty_submission() {
        assert_eq!(Responses::default().to_json(), "{}");
    }
}
