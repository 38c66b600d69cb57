use std::collections::BTreeSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use prep_core::model::{
    Category, CategoryFilter, QuestionCatalog, QuizResult, StatsError, StatsSnapshot, StatsStore,
};

use super::plan::Sampler;
use super::session::{AnswerFeedback, DisplayOptions, Navigation, QuizPhase, QuizSession};
use super::view::QuestionView;
use crate::Clock;
use crate::error::QuizError;

/// Owns the catalog, the stats store and the single live quiz slot.
///
/// Starting a quiz replaces whatever session was there. Completing the exam
/// scores it and folds the result into the stats store.
pub struct QuizController {
    catalog: Arc<QuestionCatalog>,
    stats: StatsStore,
    session: Option<QuizSession>,
    clock: Clock,
    rng: StdRng,
}

impl QuizController {
    /// Controller with an OS-seeded random source and empty stats.
    #[must_use]
    pub fn new(catalog: Arc<QuestionCatalog>, clock: Clock) -> Self {
        Self {
            catalog,
            stats: StatsStore::new(),
            session: None,
            clock,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a deterministic random source.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: StatsStore) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session
            .as_ref()
            .map_or(QuizPhase::NotStarted, QuizSession::phase)
    }

    /// Largest quiz `filter` can start.
    #[must_use]
    pub fn max_count(&self, filter: CategoryFilter) -> usize {
        Sampler::new(&self.catalog).max_count(filter)
    }

    #[must_use]
    pub fn current_view(&self) -> Option<QuestionView> {
        self.session.as_ref().map(QuizSession::view)
    }

    /// Sample a new quiz and make it the live session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptySelection` when nothing matches; the previous
    /// session, if any, is kept in that case.
    pub fn start_quiz(
        &mut self,
        filter: CategoryFilter,
        count: usize,
        display: DisplayOptions,
    ) -> Result<&QuizSession, QuizError> {
        let plan = Sampler::new(&self.catalog).sample(filter, count, &mut self.rng);
        if plan.was_clamped() {
            debug!(
                %filter,
                requested = plan.requested,
                available = plan.available,
                "question count clamped"
            );
        }
        let session = QuizSession::start(plan, display, self.clock.now()).inspect_err(|_| {
            warn!(%filter, count, "no questions available for quiz");
        })?;

        if let Some(previous) = self.session.as_ref().filter(|s| s.is_active()) {
            debug!(
                answered = previous.progress().answered,
                "discarding unfinished quiz"
            );
        }
        info!(%filter, questions = session.len(), "quiz started");
        Ok(self.session.insert(session))
    }

    fn active_session_mut(&mut self) -> Result<&mut QuizSession, QuizError> {
        self.session.as_mut().ok_or(QuizError::SessionInactive)
    }

    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` without a live quiz, or
    /// `QuizError::OutOfRange` for a bad index.
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.active_session_mut()?.go_to(index)
    }

    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` without a live quiz.
    pub fn next(&mut self) -> Result<Navigation, QuizError> {
        self.active_session_mut()?.next()
    }

    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` without a live quiz.
    pub fn prev(&mut self) -> Result<Navigation, QuizError> {
        self.active_session_mut()?.prev()
    }

    /// # Errors
    ///
    /// See `QuizSession::submit_answer`; also `QuizError::SessionInactive`
    /// without a live quiz.
    pub fn submit_answer(&mut self, selection: Option<usize>) -> Result<AnswerFeedback, QuizError> {
        let feedback = self.active_session_mut()?.submit_answer(selection)?;
        debug!(
            index = feedback.index,
            selected = feedback.selected,
            correct = feedback.is_correct,
            "answer recorded"
        );
        Ok(feedback)
    }

    /// Submit the whole exam: score it, then record every answer and the
    /// history entry in the stats store.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionInactive` without a live quiz or if it was
    /// already submitted.
    pub fn complete_exam(&mut self) -> Result<QuizResult, QuizError> {
        let completed_at = self.clock.now();
        let session = self.active_session_mut()?;
        let result = session.complete(completed_at)?;
        let elapsed_secs = (completed_at - session.started_at()).num_seconds();
        self.stats.record_result(&result, completed_at);
        info!(
            correct = result.total_correct,
            total = result.total_questions,
            percent = result.percent,
            elapsed_secs,
            "quiz completed"
        );
        Ok(result)
    }

    /// Drop the current session, finished or not.
    pub fn discard_session(&mut self) -> Option<QuizSession> {
        let dropped = self.session.take();
        if dropped.is_some() {
            debug!("quiz session discarded");
        }
        dropped
    }

    #[must_use]
    pub fn weak_categories(&self, threshold: f64) -> BTreeSet<Category> {
        self.stats.weak_categories(threshold)
    }

    #[must_use]
    pub fn export_stats(&self) -> StatsSnapshot {
        self.stats.export()
    }

    /// Replace the stats store with `snapshot`, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidSnapshot`; the current stats are kept.
    pub fn import_stats(&mut self, snapshot: StatsSnapshot) -> Result<(), StatsError> {
        match self.stats.import(snapshot) {
            Ok(()) => {
                info!(
                    attempted = self.stats.questions_attempted(),
                    quizzes = self.stats.history().len(),
                    "stats imported"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "stats import rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{QuestionId, QuestionRecord};
    use prep_core::time::{fixed_clock, fixed_now};

    fn build_catalog() -> Arc<QuestionCatalog> {
        let mut records = Vec::new();
        let mut id = 0;
        for (category, count) in [(Category::Ethics, 5), (Category::FederalRegulations, 3)] {
            for _ in 0..count {
                id += 1;
                records.push(
                    QuestionRecord::new(
                        QuestionId::new(id),
                        category,
                        format!("Q{id}"),
                        ["a", "b", "c", "d"],
                        0,
                        "",
                    )
                    .unwrap(),
                );
            }
        }
        Arc::new(QuestionCatalog::new(records).unwrap())
    }

    fn controller() -> QuizController {
        QuizController::new(build_catalog(), fixed_clock()).with_seed(5)
    }

    #[test]
    fn operations_before_start_are_inactive() {
        let mut ctl = controller();
        assert_eq!(ctl.phase(), QuizPhase::NotStarted);
        assert_eq!(ctl.next().unwrap_err(), QuizError::SessionInactive);
        assert_eq!(ctl.submit_answer(Some(0)).unwrap_err(), QuizError::SessionInactive);
        assert_eq!(ctl.complete_exam().unwrap_err(), QuizError::SessionInactive);
        assert!(ctl.current_view().is_none());
    }

    #[test]
    fn start_clamps_and_filters() {
        let mut ctl = controller();
        let session = ctl
            .start_quiz(Category::FederalRegulations.into(), 10, DisplayOptions::default())
            .unwrap();
        assert_eq!(session.len(), 3);
        assert!(
            session
                .questions()
                .iter()
                .all(|q| q.category() == Category::FederalRegulations)
        );
        assert_eq!(ctl.max_count(CategoryFilter::All), 8);
    }

    #[test]
    fn empty_selection_keeps_previous_session() {
        let mut ctl = controller();
        ctl.start_quiz(CategoryFilter::All, 4, DisplayOptions::default())
            .unwrap();
        ctl.submit_answer(Some(0)).unwrap();

        let err = ctl
            .start_quiz(Category::MortgageProducts.into(), 4, DisplayOptions::default())
            .unwrap_err();
        assert_eq!(err, QuizError::EmptySelection);
        let session = ctl.session().unwrap();
        assert_eq!(session.len(), 4);
        assert_eq!(session.answer(0), Some(0));

        let err = ctl
            .start_quiz(CategoryFilter::All, 0, DisplayOptions::default())
            .unwrap_err();
        assert_eq!(err, QuizError::EmptySelection);
    }

    #[test]
    fn completing_records_stats_once() {
        let mut ctl = controller();
        ctl.start_quiz(CategoryFilter::All, 8, DisplayOptions::default())
            .unwrap();
        for index in 0..8 {
            ctl.go_to(index).unwrap();
            ctl.submit_answer(Some(if index < 6 { 0 } else { 1 })).unwrap();
        }
        let result = ctl.complete_exam().unwrap();
        assert_eq!(result.total_correct, 6);
        assert_eq!(result.percent, 75);
        assert_eq!(ctl.phase(), QuizPhase::Completed);

        let stats = ctl.stats();
        assert_eq!(stats.questions_attempted(), 8);
        assert_eq!(stats.correct_answers(), 6);
        assert_eq!(stats.history().len(), 1);
        assert_eq!(stats.history()[0].completed_at(), Some(fixed_now()));

        assert_eq!(ctl.complete_exam().unwrap_err(), QuizError::SessionInactive);
        assert_eq!(ctl.stats().history().len(), 1);
    }

    #[test]
    fn new_start_discards_old_answers() {
        let mut ctl = controller();
        ctl.start_quiz(CategoryFilter::All, 8, DisplayOptions::default())
            .unwrap();
        ctl.submit_answer(Some(2)).unwrap();

        let session = ctl
            .start_quiz(Category::Ethics.into(), 2, DisplayOptions::default())
            .unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.answers(), &[None, None]);
        assert_eq!(session.filter(), CategoryFilter::Only(Category::Ethics));
        assert_eq!(ctl.stats().questions_attempted(), 0);
    }

    #[test]
    fn rejected_import_keeps_stats() {
        let mut ctl = controller();
        ctl.start_quiz(CategoryFilter::All, 2, DisplayOptions::default())
            .unwrap();
        ctl.complete_exam().unwrap();
        let before = ctl.export_stats();

        let bad = StatsSnapshot {
            questions_attempted: 1,
            correct_answers: 3,
            ..StatsSnapshot::default()
        };
        assert!(ctl.import_stats(bad).is_err());
        assert_eq!(ctl.export_stats(), before);

        let mut fresh = controller();
        fresh.import_stats(before.clone()).unwrap();
        assert_eq!(fresh.stats(), ctl.stats());
    }

    #[test]
    fn discard_returns_to_not_started() {
        let mut ctl = controller();
        ctl.start_quiz(CategoryFilter::All, 3, DisplayOptions::default())
            .unwrap();
        assert!(ctl.discard_session().is_some());
        assert_eq!(ctl.phase(), QuizPhase::NotStarted);
        assert!(ctl.discard_session().is_none());
    }
}
