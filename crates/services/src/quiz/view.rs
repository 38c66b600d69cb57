use serde::Serialize;

use prep_core::model::{Category, QuestionId};

/// Which navigation controls are usable for the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub index: usize,
    pub total: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

/// Presentation-agnostic snapshot of the question on screen.
///
/// Not a view-model: `number` is 1-based for display, but nothing is
/// pre-formatted and correctness is never exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub category: Category,
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub choices: Vec<String>,
    pub selected: Option<usize>,
    pub navigation: NavigationState,
}
