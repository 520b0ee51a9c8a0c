mod ports;
mod results;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::SessionError;
pub use ports::{QuizGenerator, QuizResultSaver, QuizSubmission};
pub use results::QuizResultService;
pub use session::{QuizProgress, QuizSession, SessionState, Step};
pub use workflow::{AdvanceOutcome, QuizSessionService};
