mod ids;
mod profile;
mod question;
mod quiz;
mod result;
pub mod resume;
mod score;

pub use ids::{ParseIdError, QuizId, QuizResultId};
pub use profile::{CareerProfile, ProfileError};
pub use question::{MAX_OPTIONS, MIN_OPTIONS, Question, QuestionError};
pub use quiz::{AnswerError, AnswerSet, QUIZ_LENGTH, Quiz, QuizError};
pub use result::{AttemptError, QuestionResult, QuizAttempt, QuizResult};
pub use resume::{
    ContactInfo, EntryKind, FieldError, Resume, ResumeDraft, ResumeEntry, ResumeValidationError,
};
pub use score::{Score, calculate_score, count_correct};
