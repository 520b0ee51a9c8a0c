use thiserror::Error;

use crate::model::{
    AnswerError, AttemptError, ProfileError, QuestionError, QuizError, ResumeValidationError,
};

/// Any domain validation failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Resume(#[from] ResumeValidationError),
}
