use thiserror::Error;

use crate::model::ids::QuizId;
use crate::model::question::Question;

/// Number of questions a generated quiz carries.
pub const QUIZ_LENGTH: usize = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz must contain at least one question")]
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question index {index} is out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },

    #[error("answer cannot be empty")]
    Empty,
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Ordered, immutable set of questions fetched once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    questions: Vec<Question>,
}

impl Quiz {
    /// Wrap freshly generated questions under a new identity.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        Self::from_persisted(QuizId::new_v4(), questions)
    }

    /// Rehydrate a quiz with a known identity.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are given.
    pub fn from_persisted(id: QuizId, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self { id, questions })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed quiz; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// Per-question selections for one session.
///
/// Index `i` holds the option chosen for question `i`, or `None` while the
/// question is unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet {
    answers: Vec<Option<String>>,
}

impl AnswerSet {
    /// An all-absent answer set with `len` slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            answers: vec![None; len],
        }
    }

    #[must_use]
    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self::new(quiz.len())
    }

    /// Build from raw slots, e.g. when replaying a stored attempt.
    #[must_use]
    pub fn from_slots(answers: Vec<Option<String>>) -> Self {
        Self { answers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Record (or overwrite) the selection for `index`.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OutOfRange` for an index past the end and
    /// `AnswerError::Empty` for a blank value.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<(), AnswerError> {
        let len = self.answers.len();
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AnswerError::Empty);
        }
        let slot = self
            .answers
            .get_mut(index)
            .ok_or(AnswerError::OutOfRange { index, len })?;
        *slot = Some(value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.answers.iter().map(Option::as_deref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str) -> Question {
        Question::new(prompt, vec!["a".into(), "b".into()], "a", "because").unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert_eq!(Quiz::new(Vec::new()).unwrap_err(), QuizError::Empty);
    }

    #[test]
    fn new_quizzes_get_distinct_ids() {
        let first = Quiz::new(vec![question("q1")]).unwrap();
        let second = Quiz::new(vec![question("q1")]).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.questions(), second.questions());
    }

    #[test]
    fn answer_set_matches_quiz_length_and_starts_absent() {
        let quiz = Quiz::new(vec![question("q1"), question("q2")]).unwrap();
        let answers = AnswerSet::for_quiz(&quiz);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.answered_count(), 0);
        assert!(answers.iter().all(|a| a.is_none()));
    }

    #[test]
    fn re_answering_overwrites() {
        let mut answers = AnswerSet::new(3);
        answers.set(1, "first").unwrap();
        answers.set(1, "second").unwrap();
        assert_eq!(answers.get(1), Some("second"));
        assert_eq!(answers.answered_count(), 1);
    }

    #[test]
    fn out_of_range_and_blank_answers_are_rejected() {
        let mut answers = AnswerSet::new(2);
        assert_eq!(
            answers.set(2, "x").unwrap_err(),
            AnswerError::OutOfRange { index: 2, len: 2 }
        );
        assert_eq!(answers.set(0, "  ").unwrap_err(), AnswerError::Empty);
        assert!(!answers.is_answered(0));
    }
}
