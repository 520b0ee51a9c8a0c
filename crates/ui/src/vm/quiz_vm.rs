use chrono::{DateTime, Utc};

use coach_core::model::{Quiz, QuizResult};
use services::{
    GenerationError, PersistenceError, QuizSession, QuizSubmission, SessionError, SessionState,
    Step,
};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select(String),
    Reveal,
    Next,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Answering,
    Submitting,
    Finished,
}

/// What `QuizVm::next` asks the view to do.
#[derive(Clone, Debug, PartialEq)]
pub enum NextStep {
    Moved,
    /// Last question: store this submission, then call `QuizVm::settle`.
    Submit(QuizSubmission),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: char,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub explanation: Option<String>,
    pub can_reveal: bool,
    pub can_advance: bool,
    pub is_last: bool,
    pub progress_percent: f64,
}

impl QuestionVm {
    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.is_last {
            "Finish Quiz"
        } else {
            "Next Question"
        }
    }
}

/// UI wrapper around a `QuizSession`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.session.state() {
            SessionState::NotStarted => QuizPhase::Idle,
            SessionState::InProgress { .. } => QuizPhase::Answering,
            SessionState::Submitting { .. } => QuizPhase::Submitting,
            SessionState::Finished(_) => QuizPhase::Finished,
        }
    }

    pub fn begin(&mut self, quiz: Quiz, started_at: DateTime<Utc>) {
        self.session.begin(quiz, started_at);
    }

    /// Clear the finished or abandoned run before a new quiz is fetched.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Busy` while a result is being saved.
    pub fn restart(&mut self) -> Result<(), ViewError> {
        self.session.prepare_restart().map_err(map_session_error)
    }

    /// # Errors
    ///
    /// Returns `ViewError` if the session does not accept answers right now.
    pub fn select(&mut self, value: String) -> Result<(), ViewError> {
        self.session.answer_current(value).map_err(map_session_error)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unanswered` before an option is chosen.
    pub fn reveal(&mut self) -> Result<(), ViewError> {
        self.session.reveal_explanation().map_err(map_session_error)
    }

    /// Move forward, or lock the session for submission on the last question.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unanswered` before an option is chosen.
    pub fn next(&mut self) -> Result<NextStep, ViewError> {
        match self.session.step_forward().map_err(map_session_error)? {
            Step::Moved(_) => Ok(NextStep::Moved),
            Step::AtEnd => self
                .session
                .begin_submission()
                .map(NextStep::Submit)
                .map_err(map_session_error),
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::SaveFailed` with the storage error's text when
    /// storing failed; the quiz stays on the last question with its answers.
    pub fn settle(
        &mut self,
        outcome: Result<QuizResult, PersistenceError>,
    ) -> Result<QuizResult, ViewError> {
        self.session.settle(outcome).map_err(map_session_error)
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.session.result()
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        let question = self.session.current_question()?;
        let progress = self.session.progress()?;
        let selected = self.session.current_answer();
        let answered = selected.is_some();

        let options = question
            .options()
            .iter()
            .zip('A'..='Z')
            .map(|(label, key)| OptionVm {
                key,
                label: label.clone(),
                selected: selected == Some(label.as_str()),
            })
            .collect();

        Some(QuestionVm {
            number: progress.position(),
            total: progress.total,
            prompt: question.prompt().to_string(),
            options,
            explanation: self
                .session
                .show_explanation()
                .then(|| question.explanation().to_string()),
            can_reveal: answered && !self.session.show_explanation() && self.session.is_in_progress(),
            can_advance: self.session.can_advance(),
            is_last: self.session.is_last_question(),
            progress_percent: progress.percent(),
        })
    }
}

/// Map service failures to something the quiz view can show.
#[must_use]
pub fn map_session_error(err: SessionError) -> ViewError {
    match err {
        SessionError::Unanswered { .. } => ViewError::Unanswered,
        SessionError::Generation(GenerationError::Disabled) => ViewError::GenerationDisabled,
        SessionError::Generation(err) => ViewError::GenerationFailed(err.to_string()),
        SessionError::Persistence(err) => ViewError::SaveFailed(err.to_string()),
        SessionError::SubmissionInFlight => ViewError::Busy,
        _ => ViewError::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::model::{MAX_OPTIONS, Question, QuizAttempt, QuizResultId};
    use coach_core::time::fixed_now;
    use storage::repository::StorageError;

    fn quiz() -> Quiz {
        let questions = (0..2)
            .map(|i| {
                Question::new(
                    format!("Q{i}?"),
                    vec!["yes".into(), "no".into()],
                    "yes",
                    format!("explained {i}"),
                )
                .unwrap()
            })
            .collect();
        Quiz::new(questions).unwrap()
    }

    fn started() -> QuizVm {
        let mut vm = QuizVm::new();
        vm.begin(quiz(), fixed_now());
        vm
    }

    #[test]
    fn idle_vm_has_no_question() {
        let vm = QuizVm::new();
        assert_eq!(vm.phase(), QuizPhase::Idle);
        assert!(vm.question().is_none());
    }

    #[test]
    fn question_reflects_selection_and_explanation() {
        let mut vm = started();
        let q = vm.question().unwrap();
        assert_eq!((q.number, q.total), (1, 2));
        assert_eq!(q.options[0].key, 'A');
        assert!(!q.can_advance);
        assert!(!q.can_reveal);
        assert_eq!(q.next_label(), "Next Question");
        assert_eq!(q.progress_percent, 50.0);

        vm.select("no".to_string()).unwrap();
        let q = vm.question().unwrap();
        assert!(q.options[1].selected);
        assert!(q.can_advance);
        assert!(q.can_reveal);

        vm.reveal().unwrap();
        let q = vm.question().unwrap();
        assert_eq!(q.explanation.as_deref(), Some("explained 0"));
        assert!(!q.can_reveal);
    }

    #[test]
    fn every_option_gets_a_letter_key() {
        let options: Vec<String> = (0..MAX_OPTIONS).map(|i| format!("opt {i}")).collect();
        let question = Question::new("Pick the last", options, "opt 25", "").unwrap();
        let mut vm = QuizVm::new();
        vm.begin(Quiz::new(vec![question]).unwrap(), fixed_now());

        let q = vm.question().unwrap();
        assert_eq!(q.options.len(), MAX_OPTIONS);
        assert_eq!(q.options.last().map(|o| (o.key, o.label.as_str())), Some(('Z', "opt 25")));
    }

    #[test]
    fn next_before_answer_is_unanswered() {
        let mut vm = started();
        assert_eq!(vm.next(), Err(ViewError::Unanswered));
    }

    #[test]
    fn next_on_last_question_requests_submission() {
        let mut vm = started();
        vm.select("yes".to_string()).unwrap();
        assert_eq!(vm.next(), Ok(NextStep::Moved));
        assert_eq!(vm.question().unwrap().next_label(), "Finish Quiz");

        vm.select("yes".to_string()).unwrap();
        let Ok(NextStep::Submit(submission)) = vm.next() else {
            panic!("expected a submission");
        };
        assert_eq!(vm.phase(), QuizPhase::Submitting);
        assert_eq!(vm.select("no".to_string()), Err(ViewError::Busy));
        assert_eq!(vm.restart(), Err(ViewError::Busy));

        let attempt = QuizAttempt::grade(
            &submission.quiz,
            &submission.answers,
            submission.score,
            submission.started_at,
            fixed_now(),
        )
        .unwrap();
        let result = vm
            .settle(Ok(QuizResult::new(QuizResultId::new(1), attempt)))
            .unwrap();
        assert_eq!(vm.phase(), QuizPhase::Finished);
        assert_eq!(vm.result(), Some(&result));

        vm.restart().unwrap();
        assert_eq!(vm.phase(), QuizPhase::Idle);
        assert!(vm.result().is_none());
    }

    #[test]
    fn generation_failures_keep_their_cause() {
        let err = map_session_error(GenerationError::EmptyResponse.into());
        assert_eq!(
            err,
            ViewError::GenerationFailed("quiz generation returned an empty response".into())
        );
        assert_eq!(
            map_session_error(GenerationError::Disabled.into()),
            ViewError::GenerationDisabled
        );
    }

    #[test]
    fn failed_save_returns_to_answering() {
        let mut vm = started();
        vm.select("yes".to_string()).unwrap();
        vm.next().unwrap();
        vm.select("no".to_string()).unwrap();
        vm.next().unwrap();

        let err = vm
            .settle(Err(PersistenceError::Storage(StorageError::Connection(
                "disk unplugged".into(),
            ))))
            .unwrap_err();
        assert!(matches!(err, ViewError::SaveFailed(_)));
        assert!(err.message().contains("disk unplugged"));
        assert_eq!(vm.phase(), QuizPhase::Answering);
        assert!(vm.question().unwrap().options[1].selected);
    }
}
