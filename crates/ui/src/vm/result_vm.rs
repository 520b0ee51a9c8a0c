use coach_core::model::{QuestionResult, QuizResult, Score};

use crate::vm::time_fmt::{format_datetime, format_duration};

/// One row in the assessment history.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultCardVm {
    pub id: i64,
    pub completed_at_str: String,
    pub score_label: String,
    pub correct_label: String,
}

impl From<&QuizResult> for ResultCardVm {
    fn from(result: &QuizResult) -> Self {
        Self {
            id: result.id.value(),
            completed_at_str: format_datetime(result.completed_at()),
            score_label: result.score().to_string(),
            correct_label: format!(
                "{} / {} correct",
                result.attempt.correct_count(),
                result.attempt.total()
            ),
        }
    }
}

#[must_use]
pub fn map_result_cards(results: &[QuizResult]) -> Vec<ResultCardVm> {
    results.iter().map(ResultCardVm::from).collect()
}

/// Aggregate numbers shown on the home page.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryStatsVm {
    pub attempts: usize,
    pub average_label: String,
    pub best_label: String,
    pub latest_label: String,
}

/// Summarize results ordered newest first. `None` when there are none.
#[must_use]
pub fn summarize_results(results: &[QuizResult]) -> Option<HistoryStatsVm> {
    let latest = results.first()?;
    let total: f64 = results.iter().map(|r| r.score().percent()).sum();
    #[allow(clippy::cast_precision_loss)]
    let average = Score::from_percent(total / results.len() as f64);
    let best = results
        .iter()
        .map(QuizResult::score)
        .fold(Score::ZERO, |best, s| if s > best { s } else { best });

    Some(HistoryStatsVm {
        attempts: results.len(),
        average_label: average.to_string(),
        best_label: best.to_string(),
        latest_label: latest.score().to_string(),
    })
}

/// Per-question breakdown of a finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionReviewVm {
    pub number: usize,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

impl QuestionReviewVm {
    fn new(index: usize, q: &QuestionResult) -> Self {
        Self {
            number: index + 1,
            question: q.question.clone(),
            user_answer: q
                .user_answer
                .clone()
                .unwrap_or_else(|| "Not answered".to_string()),
            correct_answer: q.correct_answer.clone(),
            is_correct: q.is_correct,
            explanation: q.explanation.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultDetailVm {
    pub id: i64,
    pub score_label: String,
    pub score_percent: f64,
    pub correct: usize,
    pub total: usize,
    pub verdict: &'static str,
    pub completed_at_str: String,
    pub duration_label: String,
    pub questions: Vec<QuestionReviewVm>,
}

impl From<&QuizResult> for ResultDetailVm {
    fn from(result: &QuizResult) -> Self {
        let attempt = &result.attempt;
        let score = result.score();
        let elapsed = attempt
            .completed_at()
            .signed_duration_since(attempt.started_at())
            .num_seconds();
        Self {
            id: result.id.value(),
            score_label: score.to_string(),
            score_percent: score.percent(),
            correct: attempt.correct_count(),
            total: attempt.total(),
            verdict: verdict(score),
            completed_at_str: format_datetime(attempt.completed_at()),
            duration_label: format_duration(elapsed),
            questions: attempt
                .questions()
                .iter()
                .enumerate()
                .map(|(index, q)| QuestionReviewVm::new(index, q))
                .collect(),
        }
    }
}

fn verdict(score: Score) -> &'static str {
    let percent = score.percent();
    if percent >= 80.0 {
        "Excellent work! You're well prepared."
    } else if percent >= 50.0 {
        "Good effort. Review the explanations below to close the gaps."
    } else {
        "Keep practicing. Focus on the questions you missed."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::model::{
        AnswerSet, Question, Quiz, QuizAttempt, QuizResultId, calculate_score,
    };
    use coach_core::time::fixed_now;

    fn result(id: i64, answers: &[Option<&str>]) -> QuizResult {
        let questions = answers
            .iter()
            .enumerate()
            .map(|(i, _)| {
                Question::new(format!("Q{i}"), vec!["a".into(), "b".into()], "a", "why")
                    .unwrap()
            })
            .collect();
        let quiz = Quiz::new(questions).unwrap();
        let answers =
            AnswerSet::from_slots(answers.iter().map(|a| a.map(str::to_string)).collect());
        let score = calculate_score(&quiz, &answers);
        let attempt = QuizAttempt::grade(
            &quiz,
            &answers,
            score,
            fixed_now() - chrono::Duration::seconds(125),
            fixed_now(),
        )
        .unwrap();
        QuizResult::new(QuizResultId::new(id), attempt)
    }

    #[test]
    fn detail_lists_each_question() {
        let detail = ResultDetailVm::from(&result(3, &[Some("a"), Some("b"), None, Some("a")]));
        assert_eq!(detail.id, 3);
        assert_eq!(detail.score_label, "50.0%");
        assert_eq!((detail.correct, detail.total), (2, 4));
        assert_eq!(detail.duration_label, "2m 05s");
        assert_eq!(detail.questions[1].user_answer, "b");
        assert!(!detail.questions[1].is_correct);
        assert_eq!(detail.questions[2].user_answer, "Not answered");
        assert_eq!(detail.questions[3].number, 4);
        assert!(detail.verdict.starts_with("Good effort"));
    }

    #[test]
    fn cards_show_score_and_counts() {
        let cards = map_result_cards(&[result(1, &[Some("a"), Some("a")])]);
        assert_eq!(cards[0].score_label, "100.0%");
        assert_eq!(cards[0].correct_label, "2 / 2 correct");
    }

    #[test]
    fn stats_average_best_and_latest() {
        let results = vec![
            result(2, &[Some("b"), Some("a")]),
            result(1, &[Some("a"), Some("a")]),
        ];
        let stats = summarize_results(&results).unwrap();
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.average_label, "75.0%");
        assert_eq!(stats.best_label, "100.0%");
        assert_eq!(stats.latest_label, "50.0%");
        assert!(summarize_results(&[]).is_none());
    }
}
