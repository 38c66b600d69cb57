//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::StatsError;
use storage::StorageError;

/// Errors emitted by quiz sessions and the quiz controller.
///
/// A failed call never changes session or stats state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions match the selected category")]
    EmptySelection,
    #[error("no answer was selected")]
    NoSelectionMade,
    #[error("no active quiz session")]
    SessionInactive,
    #[error("question {index} is out of range for a quiz of {len} questions")]
    OutOfRange { index: usize, len: usize },
    #[error("choice {index} does not exist; the question has {choices} choices")]
    InvalidChoice { index: usize, choices: usize },
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsServiceError {
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
