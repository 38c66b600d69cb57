#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod stats_service;

pub use prep_core::Clock;

pub use error::{QuizError, StatsServiceError};
pub use quiz::{
    AnswerFeedback, DisplayOptions, Navigation, NavigationState, QuestionView, QuizController,
    QuizPhase, QuizPlan, QuizProgress, QuizSession, Sampler, sample,
};
pub use stats_service::StatsService;
