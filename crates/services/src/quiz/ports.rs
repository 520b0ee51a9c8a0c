use async_trait::async_trait;
use chrono::{DateTime, Utc};

use coach_core::model::{AnswerSet, Quiz, QuizResult, Score};

use crate::error::{GenerationError, PersistenceError};

/// Source of new quizzes.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Produce a fresh quiz with a new identity.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if no quiz could be produced.
    async fn generate_quiz(&self) -> Result<Quiz, GenerationError>;
}

/// Everything needed to store a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSubmission {
    pub quiz: Quiz,
    pub answers: AnswerSet,
    pub score: Score,
    pub started_at: DateTime<Utc>,
}

/// Sink for finished sessions.
#[async_trait]
pub trait QuizResultSaver: Send + Sync {
    /// Persist the submission and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the result cannot be stored.
    async fn save_quiz_result(
        &self,
        submission: &QuizSubmission,
    ) -> Result<QuizResult, PersistenceError>;
}
