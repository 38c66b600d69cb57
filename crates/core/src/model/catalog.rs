use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::model::category::{Category, CategoryFilter};
use crate::model::ids::QuestionId;
use crate::model::question::QuestionRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
}

/// Immutable question bank. Records are shared with sessions by `Arc`.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Arc<QuestionRecord>>,
}

impl QuestionCatalog {
    /// Build a catalog, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records share an id.
    pub fn new(records: impl IntoIterator<Item = QuestionRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut questions = Vec::new();
        for record in records {
            if !seen.insert(record.id()) {
                return Err(CatalogError::DuplicateId(record.id()));
            }
            questions.push(Arc::new(record));
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Arc<QuestionRecord>] {
        &self.questions
    }

    /// Questions matching `filter`, in catalog order.
    #[must_use]
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<Arc<QuestionRecord>> {
        self.questions
            .iter()
            .filter(|q| filter.matches(q.category()))
            .cloned()
            .collect()
    }

    /// Number of questions available for `filter`; the largest quiz it can start.
    #[must_use]
    pub fn count(&self, filter: CategoryFilter) -> usize {
        self.questions
            .iter()
            .filter(|q| filter.matches(q.category()))
            .count()
    }

    #[must_use]
    pub fn by_category(&self) -> BTreeMap<Category, Vec<Arc<QuestionRecord>>> {
        let mut grouped: BTreeMap<Category, Vec<Arc<QuestionRecord>>> = BTreeMap::new();
        for question in &self.questions {
            grouped
                .entry(question.category())
                .or_default()
                .push(Arc::clone(question));
        }
        grouped
    }
}
