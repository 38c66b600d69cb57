use serde::{Deserialize, Serialize};

use crate::scoring::percent;

/// Attempt/correct tally for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub attempts: u32,
    pub correct: u32,
}

impl CategoryPerformance {
    pub fn record(&mut self, is_correct: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    /// `correct / attempts`, or 0 with no attempts.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.attempts)
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.correct, self.attempts)
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.correct <= self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tracks_attempts_and_correct() {
        let mut perf = CategoryPerformance::default();
        perf.record(true);
        perf.record(false);
        perf.record(true);
        assert_eq!(perf, CategoryPerformance { attempts: 3, correct: 2 });
        assert_eq!(perf.percent(), 67);
    }

    #[test]
    fn empty_tally_has_zero_accuracy() {
        assert_eq!(CategoryPerformance::default().accuracy(), 0.0);
        assert!(!CategoryPerformance { attempts: 1, correct: 2 }.is_consistent());
    }
}
