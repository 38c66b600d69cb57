use thiserror::Error;

use crate::model::category::Category;
use crate::model::ids::QuestionId;

/// Every question offers exactly this many choices.
pub const CHOICE_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("choice {index} cannot be empty")]
    EmptyChoice { index: usize },

    #[error("choices {first} and {second} are identical")]
    DuplicateChoice { first: usize, second: usize },

    #[error("correct index {0} is out of range for {CHOICE_COUNT} choices")]
    InvalidCorrectIndex(usize),
}

//
// ─── QUESTION RECORD ───────────────────────────────────────────────────────────
//

/// An immutable multiple-choice question from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    id: QuestionId,
    category: Category,
    prompt: String,
    choices: [String; CHOICE_COUNT],
    correct_index: usize,
    explanation: String,
}

impl QuestionRecord {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt or a choice is blank, two choices
    /// are identical, or `correct_index` does not point at a choice.
    pub fn new<S: Into<String>>(
        id: QuestionId,
        category: Category,
        prompt: impl Into<String>,
        choices: [S; CHOICE_COUNT],
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let choices: [String; CHOICE_COUNT] = choices.map(Into::into);
        for (index, choice) in choices.iter().enumerate() {
            if choice.trim().is_empty() {
                return Err(QuestionError::EmptyChoice { index });
            }
            if let Some(first) = choices[..index]
                .iter()
                .position(|earlier| earlier.trim() == choice.trim())
            {
                return Err(QuestionError::DuplicateChoice {
                    first,
                    second: index,
                });
            }
        }

        if correct_index >= CHOICE_COUNT {
            return Err(QuestionError::InvalidCorrectIndex(correct_index));
        }

        Ok(Self {
            id,
            category,
            prompt,
            choices,
            correct_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String; CHOICE_COUNT] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_choice(&self) -> &str {
        &self.choices[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// An absent answer is never correct.
    #[must_use]
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(choices: [&str; CHOICE_COUNT], correct: usize) -> Result<QuestionRecord, QuestionError> {
        QuestionRecord::new(
            QuestionId::new(1),
            Category::Ethics,
            "Which practice is prohibited?",
            choices,
            correct,
            "Steering is prohibited.",
        )
    }

    #[test]
    fn valid_question_exposes_correct_choice() {
        let q = build(["Disclosure", "Steering", "Licensing", "Recordkeeping"], 1).unwrap();
        assert_eq!(q.correct_choice(), "Steering");
        assert!(q.is_correct(Some(1)));
        assert!(!q.is_correct(Some(0)));
        assert!(!q.is_correct(None));
        assert_eq!(q.choice(4), None);
    }

    #[test]
    fn correct_index_must_be_in_range() {
        let err = build(["a", "b", "c", "d"], 4).unwrap_err();
        assert_eq!(err, QuestionError::InvalidCorrectIndex(4));
    }

    #[test]
    fn duplicate_and_blank_choices_are_rejected() {
        let err = build(["a", "b", "a ", "d"], 0).unwrap_err();
        assert_eq!(err, QuestionError::DuplicateChoice { first: 0, second: 2 });

        let err = build(["a", "  ", "c", "d"], 0).unwrap_err();
        assert_eq!(err, QuestionError::EmptyChoice { index: 1 });
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = QuestionRecord::new(
            QuestionId::new(2),
            Category::Ethics,
            " ",
            ["a", "b", "c", "d"],
            0,
            "",
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }
}
