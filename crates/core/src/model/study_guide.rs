//! Study guide: per-category outline text merged with every catalog question.

use std::sync::Arc;

use crate::model::catalog::QuestionCatalog;
use crate::model::category::Category;
use crate::model::question::QuestionRecord;

/// A labelled bullet in an outline, e.g. "TILA (Reg Z)" / "Requires APR disclosure".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPoint {
    pub term: String,
    pub detail: String,
}

impl KeyPoint {
    #[must_use]
    pub fn new(term: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            detail: detail.into(),
        }
    }
}

/// Static overview content for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideOutline {
    pub category: Category,
    pub title: String,
    pub summary: String,
    pub key_points: Vec<KeyPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuideSection {
    pub category: Category,
    /// Outline title, or the category label when no outline exists.
    pub title: String,
    pub outline: Option<GuideOutline>,
    pub questions: Vec<Arc<QuestionRecord>>,
}

impl GuideSection {
    #[must_use]
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}

/// One section per category, always in `Category::ALL` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudyGuide {
    sections: Vec<GuideSection>,
}

impl StudyGuide {
    #[must_use]
    pub fn merge(outlines: &[GuideOutline], catalog: &QuestionCatalog) -> Self {
        let mut grouped = catalog.by_category();
        let sections = Category::ALL
            .into_iter()
            .map(|category| {
                let outline = outlines.iter().find(|o| o.category == category).cloned();
                let title = outline
                    .as_ref()
                    .map_or_else(|| category.label().to_string(), |o| o.title.clone());
                GuideSection {
                    category,
                    title,
                    outline,
                    questions: grouped.remove(&category).unwrap_or_default(),
                }
            })
            .collect();
        Self { sections }
    }

    #[must_use]
    pub fn sections(&self) -> &[GuideSection] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, category: Category) -> Option<&GuideSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}
