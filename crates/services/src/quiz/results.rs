use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use coach_core::model::{QuizAttempt, QuizResult, QuizResultId};
use storage::repository::QuizResultRepository;

use super::ports::{QuizResultSaver, QuizSubmission};
use crate::Clock;
use crate::error::PersistenceError;

/// Stores graded attempts and serves the assessment history.
#[derive(Clone)]
pub struct QuizResultService {
    clock: Clock,
    repo: Arc<dyn QuizResultRepository>,
}

impl QuizResultService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn QuizResultRepository>) -> Self {
        Self { clock, repo }
    }

    /// Most recent results first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` on storage failures.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<QuizResult>, PersistenceError> {
        Ok(self.repo.list_results(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError` if the result is missing or cannot be read.
    pub async fn get_result(&self, id: QuizResultId) -> Result<QuizResult, PersistenceError> {
        Ok(self.repo.get_result(id).await?)
    }
}

#[async_trait]
impl QuizResultSaver for QuizResultService {
    async fn save_quiz_result(
        &self,
        submission: &QuizSubmission,
    ) -> Result<QuizResult, PersistenceError> {
        let completed_at = self.clock.now().max(submission.started_at);
        let attempt = QuizAttempt::grade(
            &submission.quiz,
            &submission.answers,
            submission.score,
            submission.started_at,
            completed_at,
        )?;
        let id = self.repo.append_result(&attempt).await?;
        debug!(
            result_id = %id,
            elapsed_secs = self.clock.elapsed_secs(submission.started_at),
            "quiz attempt stored"
        );
        Ok(QuizResult::new(id, attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::model::{AnswerSet, Question, Quiz, calculate_score};
    use coach_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    fn submission(answer: &str) -> QuizSubmission {
        let q = Question::new("2+2?", vec!["3".into(), "4".into()], "4", "sum").unwrap();
        let quiz = Quiz::new(vec![q]).unwrap();
        let mut answers = AnswerSet::for_quiz(&quiz);
        answers.set(0, answer).unwrap();
        let score = calculate_score(&quiz, &answers);
        QuizSubmission {
            quiz,
            answers,
            score,
            started_at: fixed_now() - chrono::Duration::seconds(90),
        }
    }

    #[tokio::test]
    async fn save_stores_graded_attempt() {
        let repo = InMemoryRepository::new();
        let service = QuizResultService::new(Clock::fixed(fixed_now()), Arc::new(repo));

        let result = service.save_quiz_result(&submission("4")).await.unwrap();
        assert_eq!(result.score().percent(), 100.0);
        assert_eq!(result.completed_at(), fixed_now());
        assert_eq!(result.attempt.questions()[0].user_answer.as_deref(), Some("4"));

        let fetched = service.get_result(result.id).await.unwrap();
        assert_eq!(fetched, result);
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let repo = InMemoryRepository::new();
        let early = QuizResultService::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()));
        let late = QuizResultService::new(
            Clock::fixed(fixed_now() + chrono::Duration::minutes(5)),
            Arc::new(repo.clone()),
        );

        let first = early.save_quiz_result(&submission("4")).await.unwrap();
        let second = late.save_quiz_result(&submission("3")).await.unwrap();

        let listed = early.list_recent(10).await.unwrap();
        assert_eq!(
            listed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }

    #[tokio::test]
    async fn missing_result_surfaces_storage_error() {
        let service = QuizResultService::new(
            Clock::fixed(fixed_now()),
            Arc::new(InMemoryRepository::new()),
        );
        let err = service.get_result(QuizResultId::new(42)).await.unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Storage(StorageError::NotFound)
        ));
    }
}
