use std::collections::BTreeMap;

use crate::model::category::Category;
use crate::model::ids::QuestionId;
use crate::model::performance::CategoryPerformance;

/// How a single question fared when the exam was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub category: Category,
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// Score of a completed quiz.
///
/// `outcomes` keeps question order so stats can be recorded in the same order
/// the questions were presented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizResult {
    pub total_correct: u32,
    pub total_questions: u32,
    pub percent: u8,
    pub category_tallies: BTreeMap<Category, CategoryPerformance>,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizResult {
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.selected.is_none()).count()
    }

    /// Rounded per-category percentages, for the completion summary.
    #[must_use]
    pub fn category_percentages(&self) -> Vec<(Category, u8)> {
        self.category_tallies
            .iter()
            .map(|(category, tally)| (*category, tally.percent()))
            .collect()
    }
}
