mod catalog;
mod category;
mod ids;
mod performance;
mod question;
mod result;
mod snapshot;
mod stats;
pub mod study_guide;

pub use catalog::{CatalogError, QuestionCatalog};
pub use category::{Category, CategoryError, CategoryFilter};
pub use ids::{ParseIdError, QuestionId};
pub use performance::CategoryPerformance;
pub use question::{CHOICE_COUNT, QuestionError, QuestionRecord};
pub use result::{QuestionOutcome, QuizResult};
pub use snapshot::StatsSnapshot;
pub use stats::{DEFAULT_WEAK_THRESHOLD, QuizHistoryEntry, StatsError, StatsStore};
pub use study_guide::{GuideOutline, GuideSection, KeyPoint, StudyGuide};
