use chrono::{DateTime, Utc};

use coach_core::model::{AnswerSet, Question, Quiz, QuizResult, calculate_score};

use super::ports::QuizSubmission;
use crate::error::{PersistenceError, SessionError};

/// Lifecycle of a single quiz session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NotStarted,
    InProgress {
        current: usize,
        show_explanation: bool,
    },
    /// A result is being stored; answering and navigation are locked.
    Submitting { current: usize },
    Finished(QuizResult),
}

/// Outcome of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    AtEnd,
}

/// Snapshot for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub current: usize,
    pub total: usize,
    pub answered: usize,
}

impl QuizProgress {
    /// 1-based position of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.position() as f64 / self.total as f64;
        ratio * 100.0
    }
}

/// In-memory controller state for one quiz run.
///
/// Synchronous transitions live here; `QuizSessionService` drives the async
/// parts (generation and persistence) around them.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    quiz: Option<Quiz>,
    answers: AnswerSet,
    started_at: Option<DateTime<Utc>>,
    state: SessionState,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            quiz: None,
            answers: AnswerSet::default(),
            started_at: None,
            state: SessionState::NotStarted,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Index of the question on screen, while a quiz is in progress or
    /// being submitted.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { current, .. } | SessionState::Submitting { current } => {
                Some(current)
            }
            SessionState::NotStarted | SessionState::Finished(_) => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        let index = self.current_index()?;
        self.quiz.as_ref()?.question(index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answers.get(self.current_index()?)
    }

    #[must_use]
    pub fn show_explanation(&self) -> bool {
        matches!(
            self.state,
            SessionState::InProgress {
                show_explanation: true,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        match (self.current_index(), self.quiz.as_ref()) {
            (Some(index), Some(quiz)) => index + 1 == quiz.len(),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self.state, SessionState::InProgress { .. })
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting { .. })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        match &self.state {
            SessionState::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the current question is answered and navigation is unlocked.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.state {
            SessionState::InProgress { current, .. } => self.answers.is_answered(current),
            _ => false,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        Some(QuizProgress {
            current: self.current_index()?,
            total: self.quiz.as_ref()?.len(),
            answered: self.answers.answered_count(),
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Install a freshly generated quiz, discarding any previous run.
    pub fn begin(&mut self, quiz: Quiz, started_at: DateTime<Utc>) {
        self.answers = AnswerSet::for_quiz(&quiz);
        self.quiz = Some(quiz);
        self.started_at = Some(started_at);
        self.state = SessionState::InProgress {
            current: 0,
            show_explanation: false,
        };
    }

    /// Back to `NotStarted` with no quiz and no answers.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Clear the session ahead of fetching a new quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmissionInFlight` while a result is being
    /// saved; the session is left as is.
    pub fn prepare_restart(&mut self) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }
        self.reset();
        Ok(())
    }

    /// Record (or overwrite) the answer for question `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no quiz is in progress, the index is out of
    /// range, or the value is blank.
    pub fn answer(&mut self, index: usize, value: impl Into<String>) -> Result<(), SessionError> {
        self.in_progress_index()?;
        self.answers.set(index, value)?;
        Ok(())
    }

    /// Record the answer for the question on screen.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::answer`].
    pub fn answer_current(&mut self, value: impl Into<String>) -> Result<(), SessionError> {
        let current = self.in_progress_index()?;
        self.answer(current, value)
    }

    /// Show the explanation for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unanswered` until the current question has an
    /// answer, or a state error when no quiz is in progress.
    pub fn reveal_explanation(&mut self) -> Result<(), SessionError> {
        let current = self.answered_index()?;
        self.state = SessionState::InProgress {
            current,
            show_explanation: true,
        };
        Ok(())
    }

    /// Move to the next question, hiding the explanation.
    ///
    /// Returns `Step::AtEnd` without changing state on the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unanswered` if the current question has no
    /// answer, or a state error when no quiz is in progress.
    pub fn step_forward(&mut self) -> Result<Step, SessionError> {
        let current = self.answered_index()?;
        let total = self.quiz.as_ref().map_or(0, Quiz::len);
        if current + 1 >= total {
            return Ok(Step::AtEnd);
        }
        let next = current + 1;
        self.state = SessionState::InProgress {
            current: next,
            show_explanation: false,
        };
        Ok(Step::Moved(next))
    }

    /// Score the session and lock it while the result is stored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmissionInFlight` if a submission is already
    /// pending, `AlreadyFinished` after completion, `NotStarted` otherwise.
    pub fn begin_submission(&mut self) -> Result<QuizSubmission, SessionError> {
        let current = self.in_progress_index()?;
        let quiz = self.quiz.clone().ok_or(SessionError::NotStarted)?;
        let started_at = self.started_at.ok_or(SessionError::NotStarted)?;
        let score = calculate_score(&quiz, &self.answers);
        self.state = SessionState::Submitting { current };
        Ok(QuizSubmission {
            quiz,
            answers: self.answers.clone(),
            score,
            started_at,
        })
    }

    /// Apply the outcome of a pending submission.
    ///
    /// On success the session is `Finished`. On failure it returns to the
    /// question it was on, answers intact, so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitting` if nothing is pending, or
    /// `SessionError::Persistence` carrying the storage failure.
    pub fn settle(
        &mut self,
        outcome: Result<QuizResult, PersistenceError>,
    ) -> Result<QuizResult, SessionError> {
        let SessionState::Submitting { current } = self.state else {
            return Err(SessionError::NotSubmitting);
        };
        match outcome {
            Ok(result) => {
                self.state = SessionState::Finished(result.clone());
                Ok(result)
            }
            Err(err) => {
                self.state = SessionState::InProgress {
                    current,
                    show_explanation: false,
                };
                Err(err.into())
            }
        }
    }

    fn in_progress_index(&self) -> Result<usize, SessionError> {
        match self.state {
            SessionState::InProgress { current, .. } => Ok(current),
            SessionState::NotStarted => Err(SessionError::NotStarted),
            SessionState::Submitting { .. } => Err(SessionError::SubmissionInFlight),
            SessionState::Finished(_) => Err(SessionError::AlreadyFinished),
        }
    }

    fn answered_index(&self) -> Result<usize, SessionError> {
        let current = self.in_progress_index()?;
        if !self.answers.is_answered(current) {
            return Err(SessionError::Unanswered { index: current });
        }
        Ok(current)
    }
}
