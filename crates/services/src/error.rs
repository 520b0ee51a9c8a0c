//! Shared error types for the services crate.

use thiserror::Error;

use coach_core::model::{AnswerError, AttemptError, QuestionError, QuizError, ResumeValidationError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Failures while fetching a new quiz from the generator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("quiz generation is not configured")]
    Disabled,
    #[error("quiz generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("quiz generation returned an empty response")]
    EmptyResponse,
    #[error("quiz generation returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("generated question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error(transparent)]
    InvalidQuiz(#[from] QuizError),
    #[error("expected {expected} questions, got {actual}")]
    UnexpectedQuestionCount { expected: usize, actual: usize },
}

/// Failures while storing a finished attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistenceError {
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PersistenceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound))
    }
}

/// Errors emitted by the quiz session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz in progress")]
    NotStarted,
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error("question {} must be answered first", .index + 1)]
    Unanswered { index: usize },
    #[error("quiz result is already being saved")]
    SubmissionInFlight,
    #[error("no quiz result is being saved")]
    NotSubmitting,
    #[error("quiz already finished")]
    AlreadyFinished,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Errors emitted by `ResumeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResumeServiceError {
    #[error(transparent)]
    Validation(#[from] ResumeValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
