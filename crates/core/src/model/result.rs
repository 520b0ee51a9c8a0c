use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuizId, QuizResultId};
use crate::model::quiz::{AnswerSet, Quiz};
use crate::model::score::Score;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("an attempt must cover at least one question")]
    NoQuestions,
}

/// How a single question was answered in a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub correct_answer: String,
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: String,
}

/// A graded quiz attempt that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    quiz_id: QuizId,
    score: Score,
    questions: Vec<QuestionResult>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Snapshot a finished session.
    ///
    /// The score is taken as given; per-question correctness is derived from
    /// the quiz and answers.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`.
    pub fn grade(
        quiz: &Quiz,
        answers: &AnswerSet,
        score: Score,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        let questions = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let user_answer = answers.get(index).map(str::to_owned);
                QuestionResult {
                    question: q.prompt().to_owned(),
                    correct_answer: q.correct_answer().to_owned(),
                    is_correct: q.is_correct(user_answer.as_deref()),
                    user_answer,
                    explanation: q.explanation().to_owned(),
                }
            })
            .collect();

        Self::from_persisted(quiz.id(), score, questions, started_at, completed_at)
    }

    /// Rehydrate an attempt from storage.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if the time range is inverted or there are no
    /// questions.
    pub fn from_persisted(
        quiz_id: QuizId,
        score: Score,
        questions: Vec<QuestionResult>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if completed_at < started_at {
            return Err(AttemptError::InvalidTimeRange);
        }
        if questions.is_empty() {
            return Err(AttemptError::NoQuestions);
        }
        Ok(Self {
            quiz_id,
            score,
            questions,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionResult] {
        &self.questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_correct).count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Confirmation record returned once an attempt has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub id: QuizResultId,
    pub attempt: QuizAttempt,
}

impl QuizResult {
    #[must_use]
    pub fn new(id: QuizResultId, attempt: QuizAttempt) -> Self {
        Self { id, attempt }
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.attempt.score()
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.attempt.completed_at()
    }

    /// Questions answered incorrectly or left unanswered.
    pub fn missed(&self) -> impl Iterator<Item = &QuestionResult> {
        self.attempt.questions().iter().filter(|q| !q.is_correct)
    }
}
