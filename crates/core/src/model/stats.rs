use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::category::Category;
use crate::model::performance::CategoryPerformance;
use crate::model::result::QuizResult;
use crate::model::snapshot::StatsSnapshot;
use crate::scoring::percent;

/// Categories below this accuracy are reported as weak.
pub const DEFAULT_WEAK_THRESHOLD: f64 = 0.7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatsError {
    #[error("invalid stats snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("failed to encode stats snapshot: {0}")]
    Encode(String),
}

//
// ─── HISTORY ───────────────────────────────────────────────────────────────────
//

/// Summary of one completed quiz, appended once and never changed.
///
/// `date` is written as RFC 3339 but kept as free text, so snapshots from
/// other exporters with locale-formatted dates still import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizHistoryEntry {
    pub date: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub percent: u8,
    pub category_breakdown: BTreeMap<Category, CategoryPerformance>,
}

impl QuizHistoryEntry {
    #[must_use]
    pub fn from_result(result: &QuizResult, completed_at: DateTime<Utc>) -> Self {
        Self {
            date: completed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            total_questions: result.total_questions,
            correct_answers: result.total_correct,
            percent: result.percent,
            category_breakdown: result.category_tallies.clone(),
        }
    }

    /// The completion time, when `date` is RFC 3339.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

//
// ─── STORE ─────────────────────────────────────────────────────────────────────
//

/// Cumulative performance across every completed quiz.
///
/// Counters only grow, except through `import`, which swaps the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsStore {
    questions_attempted: u32,
    correct_answers: u32,
    category_performance: BTreeMap<Category, CategoryPerformance>,
    quiz_history: Vec<QuizHistoryEntry>,
}

impl StatsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn questions_attempted(&self) -> u32 {
        self.questions_attempted
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn category_performance(&self) -> &BTreeMap<Category, CategoryPerformance> {
        &self.category_performance
    }

    #[must_use]
    pub fn performance(&self, category: Category) -> Option<CategoryPerformance> {
        self.category_performance.get(&category).copied()
    }

    /// Completed quizzes, oldest first.
    #[must_use]
    pub fn history(&self) -> &[QuizHistoryEntry] {
        &self.quiz_history
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions_attempted == 0 && self.quiz_history.is_empty()
    }

    pub fn record_answer(&mut self, category: Category, is_correct: bool) {
        self.questions_attempted = self.questions_attempted.saturating_add(1);
        if is_correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        }
        self.category_performance
            .entry(category)
            .or_default()
            .record(is_correct);
    }

    /// Append the history entry for a completed quiz.
    pub fn record_session(&mut self, result: &QuizResult, completed_at: DateTime<Utc>) {
        self.quiz_history
            .push(QuizHistoryEntry::from_result(result, completed_at));
    }

    /// Record every answer of `result` in question order, then its history entry.
    pub fn record_result(&mut self, result: &QuizResult, completed_at: DateTime<Utc>) {
        for outcome in &result.outcomes {
            self.record_answer(outcome.category, outcome.is_correct);
        }
        self.record_session(result, completed_at);
    }

    /// Historical accuracy in `[0, 1]`; 0 for a category never attempted.
    #[must_use]
    pub fn compute_accuracy(&self, category: Category) -> f64 {
        self.category_performance
            .get(&category)
            .map_or(0.0, CategoryPerformance::accuracy)
    }

    #[must_use]
    pub fn overall_percent(&self) -> u8 {
        percent(self.correct_answers, self.questions_attempted)
    }

    /// Attempted categories whose accuracy is strictly below `threshold`.
    #[must_use]
    pub fn weak_categories(&self, threshold: f64) -> BTreeSet<Category> {
        self.category_performance
            .iter()
            .filter(|(_, perf)| perf.attempts > 0 && perf.accuracy() < threshold)
            .map(|(category, _)| *category)
            .collect()
    }

    #[must_use]
    pub fn export(&self) -> StatsSnapshot {
        StatsSnapshot {
            questions_attempted: self.questions_attempted,
            correct_answers: self.correct_answers,
            category_performance: self.category_performance.clone(),
            quiz_history: self.quiz_history.clone(),
        }
    }

    /// Replace the whole store with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidSnapshot` if the snapshot is inconsistent; the
    /// store is left untouched in that case.
    pub fn import(&mut self, snapshot: StatsSnapshot) -> Result<(), StatsError> {
        snapshot.validate()?;
        *self = Self {
            questions_attempted: snapshot.questions_attempted,
            correct_answers: snapshot.correct_answers,
            category_performance: snapshot.category_performance,
            quiz_history: snapshot.quiz_history,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn record_many(store: &mut StatsStore, category: Category, correct: u32, wrong: u32) {
        for _ in 0..correct {
            store.record_answer(category, true);
        }
        for _ in 0..wrong {
            store.record_answer(category, false);
        }
    }

    #[test]
    fn ethics_at_seventy_percent_is_not_weak() {
        let mut store = StatsStore::new();
        record_many(&mut store, Category::Ethics, 7, 3);
        record_many(&mut store, Category::StateRegulations, 69, 31);

        assert_eq!(store.compute_accuracy(Category::Ethics), 0.7);
        let weak = store.weak_categories(DEFAULT_WEAK_THRESHOLD);
        assert!(!weak.contains(&Category::Ethics));
        assert!(weak.contains(&Category::StateRegulations));
    }

    #[test]
    fn unattempted_category_has_zero_accuracy_and_is_not_weak() {
        let store = StatsStore::new();
        assert_eq!(store.compute_accuracy(Category::MortgageProducts), 0.0);
        assert!(store.weak_categories(DEFAULT_WEAK_THRESHOLD).is_empty());
        assert_eq!(store.overall_percent(), 0);
    }

    #[test]
    fn record_answer_updates_cumulative_and_category_counts() {
        let mut store = StatsStore::new();
        store.record_answer(Category::LoanOrigination, true);
        store.record_answer(Category::LoanOrigination, false);
        store.record_answer(Category::Ethics, true);

        assert_eq!(store.questions_attempted(), 3);
        assert_eq!(store.correct_answers(), 2);
        assert_eq!(
            store.performance(Category::LoanOrigination),
            Some(CategoryPerformance { attempts: 2, correct: 1 })
        );
        assert_eq!(store.overall_percent(), 67);
    }

    #[test]
    fn record_session_appends_in_order() {
        let mut store = StatsStore::new();
        let first = QuizResult {
            total_correct: 1,
            total_questions: 2,
            percent: 50,
            ..QuizResult::default()
        };
        let second = QuizResult {
            total_correct: 2,
            total_questions: 2,
            percent: 100,
            ..QuizResult::default()
        };
        store.record_session(&first, fixed_now());
        store.record_session(&second, fixed_now() + chrono::Duration::hours(1));

        let percents: Vec<_> = store.history().iter().map(|h| h.percent).collect();
        assert_eq!(percents, vec![50, 100]);
        assert_eq!(store.history()[0].date, "2023-11-14T22:13:20Z");
        assert_eq!(
            store.history()[1].completed_at(),
            Some(fixed_now() + chrono::Duration::hours(1))
        );
    }

    #[test]
    fn import_of_export_round_trips() {
        let mut store = StatsStore::new();
        record_many(&mut store, Category::Ethics, 2, 1);
        store.record_session(
            &QuizResult {
                total_correct: 2,
                total_questions: 3,
                percent: 67,
                ..QuizResult::default()
            },
            fixed_now(),
        );

        let mut restored = StatsStore::new();
        restored.import(store.export()).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn rejected_import_leaves_store_untouched() {
        let mut store = StatsStore::new();
        record_many(&mut store, Category::Ethics, 1, 0);
        let before = store.clone();

        let mut bad = store.export();
        bad.correct_answers = 5;
        let err = store.import(bad).unwrap_err();
        assert!(matches!(err, StatsError::InvalidSnapshot(_)));
        assert_eq!(store, before);

        let err = StatsSnapshot::from_json(
            r#"{"questionsAttempted":1,"correctAnswers":1,"categoryPerformance":{}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, StatsError::InvalidSnapshot(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn imports_history_with_locale_formatted_date() {
        let text = r#"{
            "questionsAttempted": 10,
            "correctAnswers": 7,
            "categoryPerformance": { "Ethics": { "attempts": 10, "correct": 7 } },
            "quizHistory": [{
                "date": "10/19/2026, 3:45:12 PM",
                "totalQuestions": 10,
                "correctAnswers": 7,
                "percent": 70,
                "categoryBreakdown": { "Ethics": { "attempts": 10, "correct": 7 } }
            }]
        }"#;

        let mut store = StatsStore::new();
        store.import(StatsSnapshot::from_json(text).unwrap()).unwrap();

        let entry = &store.history()[0];
        assert_eq!(entry.date, "10/19/2026, 3:45:12 PM");
        assert_eq!(entry.completed_at(), None);
        assert_eq!(store.export().quiz_history[0].date, entry.date);
    }
}
