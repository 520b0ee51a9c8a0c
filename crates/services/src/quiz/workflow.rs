use std::sync::Arc;

use tracing::{debug, info, warn};

use coach_core::model::{Quiz, QuizResult};

use super::ports::{QuizGenerator, QuizResultSaver, QuizSubmission};
use super::session::{QuizSession, Step};
use crate::Clock;
use crate::error::{PersistenceError, SessionError};

/// Result of `QuizSessionService::advance`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Moved { index: usize },
    Finished(QuizResult),
}

/// Orchestrates quiz generation and result persistence around a
/// `QuizSession`.
///
/// `start`, `advance`, `finish` and `restart` hold the session borrowed
/// across the await. A UI that keeps the session in reactive state uses the
/// split calls instead: `generate` then `QuizSession::begin`, and
/// `QuizSession::begin_submission`, `submit`, `QuizSession::settle`. Both
/// paths share the session's own guards (`step_forward`,
/// `begin_submission`, `prepare_restart`).
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    generator: Arc<dyn QuizGenerator>,
    saver: Arc<dyn QuizResultSaver>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        generator: Arc<dyn QuizGenerator>,
        saver: Arc<dyn QuizResultSaver>,
    ) -> Self {
        Self {
            clock,
            generator,
            saver,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Fetch a new quiz and install it on the session.
    ///
    /// On failure the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generation` if no quiz could be produced, or
    /// `SubmissionInFlight` while a result is being saved.
    pub async fn start(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        if session.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }
        let quiz = self.generate().await?;
        session.begin(quiz, self.clock.now());
        Ok(())
    }

    /// Ask the generator for a quiz without touching any session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generation` on failure.
    pub async fn generate(&self) -> Result<Quiz, SessionError> {
        match self.generator.generate_quiz().await {
            Ok(quiz) => {
                info!(quiz_id = %quiz.id(), questions = quiz.len(), "quiz generated");
                Ok(quiz)
            }
            Err(err) => {
                warn!(error = %err, "quiz generation failed");
                Err(err.into())
            }
        }
    }

    /// Move to the next question, or finish the quiz from the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unanswered` if the current question has no
    /// answer, plus any error from [`QuizSessionService::finish`].
    pub async fn advance(&self, session: &mut QuizSession) -> Result<AdvanceOutcome, SessionError> {
        match session.step_forward()? {
            Step::Moved(index) => {
                debug!(index, "advanced to next question");
                Ok(AdvanceOutcome::Moved { index })
            }
            Step::AtEnd => self.finish(session).await.map(AdvanceOutcome::Finished),
        }
    }

    /// Score the session and store the result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Persistence` if storing fails (the session
    /// stays in progress with its answers), or a state error if the session
    /// cannot be submitted.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<QuizResult, SessionError> {
        let submission = session.begin_submission()?;
        let outcome = self.submit(&submission).await;
        session.settle(outcome)
    }

    /// Store a submission taken from `QuizSession::begin_submission`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the saver fails.
    pub async fn submit(&self, submission: &QuizSubmission) -> Result<QuizResult, PersistenceError> {
        match self.saver.save_quiz_result(submission).await {
            Ok(result) => {
                info!(
                    result_id = %result.id,
                    quiz_id = %submission.quiz.id(),
                    score = %result.score(),
                    "quiz result saved"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, quiz_id = %submission.quiz.id(), "saving quiz result failed");
                Err(err)
            }
        }
    }

    /// Discard the current run and start a new quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmissionInFlight` while a result is being
    /// saved, or `Generation` if the new quiz cannot be fetched (the session
    /// is then `NotStarted`).
    pub async fn restart(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        session.prepare_restart()?;
        self.start(session).await
    }
}
