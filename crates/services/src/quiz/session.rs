use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use prep_core::model::{CategoryFilter, QuestionRecord, QuizResult};
use prep_core::scoring::score;

use super::plan::QuizPlan;
use super::progress::QuizProgress;
use super::view::{NavigationState, QuestionView};
use crate::error::QuizError;

//
// ─── OPTIONS & STATES ──────────────────────────────────────────────────────────
//

/// What the quiz reveals after each answer. Fixed for the life of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    pub reveal_answers_immediately: bool,
    pub show_explanations: bool,
}

/// Lifecycle of the quiz slot: `NotStarted → Active → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizPhase {
    NotStarted,
    Active,
    Completed,
}

/// Outcome of a `prev`/`next` step.
///
/// Hitting either end is not an error; renderers disable the matching control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: usize, to: usize },
    AtBoundary { index: usize },
}

impl Navigation {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Navigation::Moved { .. })
    }
}

/// Immediate feedback for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub index: usize,
    pub selected: usize,
    pub is_correct: bool,
    /// Revealed when the answer is wrong, or always with `reveal_answers_immediately`.
    pub correct_index: Option<usize>,
    pub correct_choice: Option<String>,
    /// Revealed only with `show_explanations`.
    pub explanation: Option<String>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run over a fixed, sampled list of questions.
///
/// `answers` always has one slot per question. Once the exam is submitted the
/// session is terminal: reads still work, every mutation fails with
/// `QuizError::SessionInactive`.
pub struct QuizSession {
    filter: CategoryFilter,
    questions: Vec<Arc<QuestionRecord>>,
    answers: Vec<Option<usize>>,
    current: usize,
    display: DisplayOptions,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Start a session from a sampled plan.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptySelection` if the plan holds no questions.
    pub fn start(
        plan: QuizPlan,
        display: DisplayOptions,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if plan.questions.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        let answers = vec![None; plan.questions.len()];
        Ok(Self {
            filter: plan.filter,
            questions: plan.questions,
            answers,
            current: 0,
            display,
            started_at,
            completed_at: None,
            result: None,
        })
    }

    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    #[must_use]
    pub fn questions(&self) -> &[Arc<QuestionRecord>] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: a session cannot start without questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &QuestionRecord {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn display_options(&self) -> DisplayOptions {
        self.display
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.completed_at.is_none()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_active() {
            QuizPhase::Active
        } else {
            QuizPhase::Completed
        }
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.is_active() && self.current > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.is_active() && self.current + 1 < self.questions.len()
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        NavigationState {
            index: self.current,
            total: self.questions.len(),
            can_go_prev: self.can_go_prev(),
            can_go_next: self.can_go_next(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = self.answers.iter().filter(|a| a.is_some()).count();
        QuizProgress {
            total: self.questions.len(),
            answered,
            unanswered: self.questions.len() - answered,
            current: self.current,
            is_complete: !self.is_active(),
        }
    }

    #[must_use]
    pub fn view(&self) -> QuestionView {
        let question = self.current_question();
        QuestionView {
            question_id: question.id(),
            category: question.category(),
            number: self.current + 1,
            total: self.questions.len(),
            prompt: question.prompt().to_string(),
            choices: question.choices().to_vec(),
            selected: self.answer(self.current),
            navigation: self.navigation(),
        }
    }

    fn ensure_active(&self) -> Result<(), QuizError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(QuizError::SessionInactive)
        }
    }

    /// Jump to a question by zero-based index.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` after completion and
    /// `QuizError::OutOfRange` for an index past the end.
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.ensure_active()?;
        if index >= self.questions.len() {
            return Err(QuizError::OutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` after completion.
    pub fn next(&mut self) -> Result<Navigation, QuizError> {
        self.ensure_active()?;
        if !self.can_go_next() {
            return Ok(Navigation::AtBoundary {
                index: self.current,
            });
        }
        let from = self.current;
        self.current += 1;
        Ok(Navigation::Moved {
            from,
            to: self.current,
        })
    }

    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` after completion.
    pub fn prev(&mut self) -> Result<Navigation, QuizError> {
        self.ensure_active()?;
        if !self.can_go_prev() {
            return Ok(Navigation::AtBoundary {
                index: self.current,
            });
        }
        let from = self.current;
        self.current -= 1;
        Ok(Navigation::Moved {
            from,
            to: self.current,
        })
    }

    /// Record `selection` for the current question, replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` after completion,
    /// `QuizError::NoSelectionMade` for `None`, and `QuizError::InvalidChoice`
    /// for an index past the last choice. Nothing is recorded on error.
    pub fn submit_answer(&mut self, selection: Option<usize>) -> Result<AnswerFeedback, QuizError> {
        self.ensure_active()?;
        let selected = selection.ok_or(QuizError::NoSelectionMade)?;
        let question = &self.questions[self.current];
        if question.choice(selected).is_none() {
            return Err(QuizError::InvalidChoice {
                index: selected,
                choices: question.choices().len(),
            });
        }

        self.answers[self.current] = Some(selected);
        let is_correct = question.is_correct(Some(selected));
        let reveal = self.display.reveal_answers_immediately || !is_correct;

        Ok(AnswerFeedback {
            index: self.current,
            selected,
            is_correct,
            correct_index: reveal.then(|| question.correct_index()),
            correct_choice: reveal.then(|| question.correct_choice().to_string()),
            explanation: self
                .display
                .show_explanations
                .then(|| question.explanation().to_string()),
        })
    }

    /// Score the exam and close the session. Unanswered questions count as wrong.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` if the exam was already submitted.
    pub fn complete(&mut self, completed_at: DateTime<Utc>) -> Result<QuizResult, QuizError> {
        self.ensure_active()?;
        let result = score(&self.questions, &self.answers);
        self.completed_at = Some(completed_at);
        self.result = Some(result.clone());
        Ok(result)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("filter", &self.filter)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.iter().filter(|a| a.is_some()).count())
            .field("display", &self.display)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
