use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::quiz::{AnswerSet, Quiz};

/// Percentage of correctly answered questions, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);
    pub const PERFECT: Score = Score(100.0);

    /// Wrap a raw percentage, clamping into range. `NaN` becomes zero.
    #[must_use]
    pub fn from_percent(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// `(correct / total) * 100`, or zero when `total` is zero.
    #[must_use]
    pub fn from_counts(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        // Question counts are tiny; the f64 conversion is exact.
        #[allow(clippy::cast_precision_loss)]
        let ratio = correct.min(total) as f64 / total as f64;
        Self(ratio * 100.0)
    }

    #[must_use]
    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Number of answers that exactly match their question's correct answer.
///
/// Missing slots (a shorter answer set) count as incorrect; extra slots are
/// ignored.
#[must_use]
pub fn count_correct(quiz: &Quiz, answers: &AnswerSet) -> usize {
    quiz.questions()
        .iter()
        .enumerate()
        .filter(|(index, question)| question.is_correct(answers.get(*index)))
        .count()
}

/// Score a quiz attempt.
///
/// An empty quiz scores zero rather than dividing by zero.
#[must_use]
pub fn calculate_score(quiz: &Quiz, answers: &AnswerSet) -> Score {
    Score::from_counts(count_correct(quiz, answers), quiz.len())
}
