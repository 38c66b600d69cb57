use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use prep_core::model::{CategoryFilter, QuestionCatalog, QuestionRecord};

/// Questions picked for one quiz, plus how the request was satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub filter: CategoryFilter,
    pub questions: Vec<Arc<QuestionRecord>>,
    pub requested: usize,
    pub available: usize,
}

impl QuizPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// True when fewer questions were picked than requested.
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        self.questions.len() < self.requested
    }
}

/// Draws quiz questions from a catalog without replacement.
///
/// The random source is passed per call so tests can use a seeded `StdRng`.
/// Selection is a partial Fisher–Yates shuffle of the filtered pool: every
/// matching question has the same chance of being picked, and the picked
/// questions come back in uniformly random order.
pub struct Sampler<'a> {
    catalog: &'a QuestionCatalog,
}

impl<'a> Sampler<'a> {
    #[must_use]
    pub fn new(catalog: &'a QuestionCatalog) -> Self {
        Self { catalog }
    }

    /// Largest quiz `filter` can produce.
    #[must_use]
    pub fn max_count(&self, filter: CategoryFilter) -> usize {
        self.catalog.count(filter)
    }

    /// Pick up to `count` questions matching `filter`.
    ///
    /// `count` is clamped to the number of matching questions; an empty pool
    /// yields an empty plan.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        filter: CategoryFilter,
        count: usize,
        rng: &mut R,
    ) -> QuizPlan {
        let mut pool = self.catalog.filtered(filter);
        let available = pool.len();
        let take = count.min(available);

        let (picked, _rest) = pool.partial_shuffle(rng, take);
        let questions = picked.to_vec();

        QuizPlan {
            filter,
            questions,
            requested: count,
            available,
        }
    }
}

/// Convenience wrapper around `Sampler::sample` returning only the questions.
pub fn sample<R: Rng + ?Sized>(
    catalog: &QuestionCatalog,
    filter: CategoryFilter,
    count: usize,
    rng: &mut R,
) -> Vec<Arc<QuestionRecord>> {
    Sampler::new(catalog).sample(filter, count, rng).questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{Category, QuestionId};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn build_catalog(per_category: u32) -> QuestionCatalog {
        let mut records = Vec::new();
        let mut next_id = 1;
        for category in Category::ALL {
            for n in 0..per_category {
                records.push(
                    QuestionRecord::new(
                        QuestionId::new(next_id),
                        category,
                        format!("{category} #{n}"),
                        ["a", "b", "c", "d"],
                        0,
                        "",
                    )
                    .unwrap(),
                );
                next_id += 1;
            }
        }
        QuestionCatalog::new(records).unwrap()
    }

    #[test]
    fn count_is_clamped_to_available() {
        let catalog = build_catalog(5);
        let mut rng = StdRng::seed_from_u64(7);
        let plan = Sampler::new(&catalog).sample(
            CategoryFilter::Only(Category::Ethics),
            50,
            &mut rng,
        );
        assert_eq!(plan.total(), 5);
        assert_eq!(plan.available, 5);
        assert!(plan.was_clamped());
    }

    #[test]
    fn empty_pool_gives_empty_plan() {
        let catalog = QuestionCatalog::default();
        let mut rng = StdRng::seed_from_u64(1);
        let plan = Sampler::new(&catalog).sample(CategoryFilter::All, 10, &mut rng);
        assert!(plan.is_empty());
        assert_eq!(plan.available, 0);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let catalog = build_catalog(20);
        let ids = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            sample(&catalog, CategoryFilter::All, 15, &mut rng)
                .iter()
                .map(|q| q.id())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(42), ids(42));
    }

    #[test]
    fn every_question_can_be_selected() {
        let catalog = build_catalog(4);
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..300 {
            for q in sample(&catalog, CategoryFilter::Only(Category::LoanOrigination), 1, &mut rng) {
                seen.insert(q.id());
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn first_slot_is_roughly_uniform() {
        let catalog = build_catalog(3);
        let mut rng = StdRng::seed_from_u64(11);
        let mut hits = std::collections::HashMap::new();
        let rounds = 6_000;
        for _ in 0..rounds {
            let picked = sample(&catalog, CategoryFilter::Only(Category::Ethics), 3, &mut rng);
            *hits.entry(picked[0].id()).or_insert(0_u32) += 1;
        }
        assert_eq!(hits.len(), 3);
        for count in hits.values() {
            // Expected 2000 each; a biased comparator shuffle drifts far outside this band.
            assert!((1_700..=2_300).contains(count), "count {count} out of band");
        }
    }

    proptest! {
        #[test]
        fn samples_are_distinct_sized_and_filtered(
            seed in any::<u64>(),
            count in 0usize..40,
            filter_pick in 0usize..7,
        ) {
            let catalog = build_catalog(6);
            let filter = if filter_pick == 6 {
                CategoryFilter::All
            } else {
                CategoryFilter::Only(Category::ALL[filter_pick])
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = Sampler::new(&catalog).sample(filter, count, &mut rng);

            prop_assert_eq!(plan.total(), count.min(catalog.count(filter)));
            let ids: HashSet<_> = plan.questions.iter().map(|q| q.id()).collect();
            prop_assert_eq!(ids.len(), plan.total());
            prop_assert!(plan.questions.iter().all(|q| filter.matches(q.category())));
        }
    }
}
