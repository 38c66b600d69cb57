mod plan;
mod progress;
mod session;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use plan::{QuizPlan, Sampler, sample};
pub use progress::QuizProgress;
pub use session::{AnswerFeedback, DisplayOptions, Navigation, QuizPhase, QuizSession};
pub use view::{NavigationState, QuestionView};
pub use workflow::QuizController;
