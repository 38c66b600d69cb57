use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::performance::CategoryPerformance;
use crate::model::stats::{QuizHistoryEntry, StatsError};

/// Serializable copy of a `StatsStore`.
///
/// The JSON shape uses camelCase keys and category labels as map keys:
///
/// ```json
/// {
///   "questionsAttempted": 10,
///   "correctAnswers": 7,
///   "categoryPerformance": { "Ethics": { "attempts": 10, "correct": 7 } },
///   "quizHistory": [ { "date": "2023-11-14T22:13:20Z", "totalQuestions": 10,
///                      "correctAnswers": 7, "percent": 70,
///                      "categoryBreakdown": { "Ethics": { "attempts": 10, "correct": 7 } } } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub questions_attempted: u32,
    pub correct_answers: u32,
    pub category_performance: BTreeMap<Category, CategoryPerformance>,
    pub quiz_history: Vec<QuizHistoryEntry>,
}

impl StatsSnapshot {
    /// Parse a snapshot document. Every top-level field is required.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidSnapshot` on malformed JSON or a wrong shape.
    pub fn from_json(text: &str) -> Result<Self, StatsError> {
        serde_json::from_str(text).map_err(|e| StatsError::InvalidSnapshot(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StatsError::Encode` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, StatsError> {
        serde_json::to_string_pretty(self).map_err(|e| StatsError::Encode(e.to_string()))
    }

    /// Check counter invariants that the JSON shape alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidSnapshot` describing the first violation.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.correct_answers > self.questions_attempted {
            return Err(StatsError::InvalidSnapshot(format!(
                "correctAnswers ({}) exceeds questionsAttempted ({})",
                self.correct_answers, self.questions_attempted
            )));
        }
        check_tallies("categoryPerformance", &self.category_performance)?;

        for (position, entry) in self.quiz_history.iter().enumerate() {
            if entry.correct_answers > entry.total_questions {
                return Err(StatsError::InvalidSnapshot(format!(
                    "quizHistory[{position}]: correctAnswers ({}) exceeds totalQuestions ({})",
                    entry.correct_answers, entry.total_questions
                )));
            }
            if entry.percent > 100 {
                return Err(StatsError::InvalidSnapshot(format!(
                    "quizHistory[{position}]: percent {} is above 100",
                    entry.percent
                )));
            }
            check_tallies(
                &format!("quizHistory[{position}].categoryBreakdown"),
                &entry.category_breakdown,
            )?;
        }
        Ok(())
    }
}

fn check_tallies(
    field: &str,
    tallies: &BTreeMap<Category, CategoryPerformance>,
) -> Result<(), StatsError> {
    match tallies.iter().find(|(_, perf)| !perf.is_consistent()) {
        Some((category, perf)) => Err(StatsError::InvalidSnapshot(format!(
            "{field}.{category}: correct ({}) exceeds attempts ({})",
            perf.correct, perf.attempts
        ))),
        None => Ok(()),
    }
}
