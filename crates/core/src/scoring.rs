//! Pure scoring of a finished quiz.

use std::sync::Arc;

use crate::model::{QuestionOutcome, QuestionRecord, QuizResult};

/// `round(100 * correct / total)` with halves rounded up; 0 when `total` is 0.
///
/// Integer arithmetic keeps `x.5` cases exact.
#[must_use]
pub fn percent(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Score `answers` against `questions`, position by position.
///
/// A missing slot (unanswered, or `answers` shorter than `questions`) counts as
/// incorrect.
#[must_use]
pub fn score(questions: &[Arc<QuestionRecord>], answers: &[Option<usize>]) -> QuizResult {
    let mut result = QuizResult::default();

    for (position, question) in questions.iter().enumerate() {
        let selected = answers.get(position).copied().flatten();
        let is_correct = question.is_correct(selected);

        result.total_questions = result.total_questions.saturating_add(1);
        if is_correct {
            result.total_correct = result.total_correct.saturating_add(1);
        }
        result
            .category_tallies
            .entry(question.category())
            .or_default()
            .record(is_correct);
        result.outcomes.push(QuestionOutcome {
            question_id: question.id(),
            category: question.category(),
            selected,
            correct_index: question.correct_index(),
            is_correct,
        });
    }

    result.percent = percent(result.total_correct, result.total_questions);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryPerformance, QuestionId};
    use proptest::prelude::*;

    fn question(id: u32, category: Category, correct: usize) -> Arc<QuestionRecord> {
        Arc::new(
            QuestionRecord::new(
                QuestionId::new(id),
                category,
                format!("Q{id}"),
                ["a", "b", "c", "d"],
                correct,
                "",
            )
            .unwrap(),
        )
    }

    #[test]
    fn seven_of_ten_with_three_unanswered_is_seventy_percent() {
        let questions: Vec<_> = (0..10).map(|i| question(i, Category::Ethics, 2)).collect();
        let mut answers = vec![Some(2); 7];
        answers.extend([None, None, None]);

        let result = score(&questions, &answers);
        assert_eq!(result.total_correct, 7);
        assert_eq!(result.total_questions, 10);
        assert_eq!(result.percent, 70);
        assert_eq!(result.unanswered(), 3);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let result = score(&[], &[]);
        assert_eq!(result.percent, 0);
        assert_eq!(result.total_questions, 0);
        assert!(result.category_tallies.is_empty());
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(percent(1, 8), 13); // 12.5
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn tallies_split_by_category_in_order() {
        let questions = vec![
            question(1, Category::Ethics, 0),
            question(2, Category::FederalRegulations, 1),
            question(3, Category::Ethics, 3),
        ];
        let answers = vec![Some(0), Some(0), Some(3)];

        let result = score(&questions, &answers);
        assert_eq!(
            result.category_tallies[&Category::Ethics],
            CategoryPerformance { attempts: 2, correct: 2 }
        );
        assert_eq!(
            result.category_tallies[&Category::FederalRegulations],
            CategoryPerformance { attempts: 1, correct: 0 }
        );
        let ids: Vec<_> = result.outcomes.iter().map(|o| o.question_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            result.category_percentages(),
            vec![(Category::FederalRegulations, 0), (Category::Ethics, 100)]
        );
    }

    #[test]
    fn short_answer_list_counts_as_unanswered() {
        let questions = vec![question(1, Category::Ethics, 0), question(2, Category::Ethics, 0)];
        let result = score(&questions, &[Some(0)]);
        assert_eq!(result.total_correct, 1);
        assert_eq!(result.outcomes[1].selected, None);
    }

    proptest! {
        #[test]
        fn percent_is_bounded(correct in 0u32..500, total in 0u32..500) {
            let p = percent(correct, total);
            prop_assert!(p <= 100);
            if total > 0 && correct >= total {
                prop_assert_eq!(p, 100);
            }
        }

        #[test]
        fn percent_matches_float_rounding(correct in 0u32..1000, extra in 1u32..1000) {
            let total = correct + extra;
            let expected = (100.0 * f64::from(correct) / f64::from(total) + 0.5).floor();
            prop_assert_eq!(f64::from(percent(correct, total)), expected);
        }
    }
}
