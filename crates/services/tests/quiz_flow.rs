use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use coach_core::model::{Question, QUIZ_LENGTH, Quiz, QuizResult, Score};
use coach_core::time::fixed_now;
use services::{
    AdvanceOutcome, AppServices, Clock, GenerationError, PersistenceError, QuizGenerator,
    QuizResultSaver, QuizSession, QuizSessionService, QuizSubmission, SessionError, SessionState,
};
use storage::repository::{Storage, StorageError};

/// Hands out a fresh quiz per call; every correct answer is "b".
#[derive(Default)]
struct ScriptedGenerator {
    calls: AtomicUsize,
    fail: AtomicBool,
}

#[async_trait]
impl QuizGenerator for ScriptedGenerator {
    async fn generate_quiz(&self) -> Result<Quiz, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(GenerationError::EmptyResponse);
        }
        let questions = (0..QUIZ_LENGTH)
            .map(|i| {
                Question::new(
                    format!("Question {i}?"),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    "b",
                    format!("b is right for {i}"),
                )
                .unwrap()
            })
            .collect();
        Ok(Quiz::new(questions).unwrap())
    }
}

/// Delegates to the real result service unless told to fail.
struct FlakySaver {
    inner: Arc<dyn QuizResultSaver>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl QuizResultSaver for FlakySaver {
    async fn save_quiz_result(
        &self,
        submission: &QuizSubmission,
    ) -> Result<QuizResult, PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("disk unplugged".into()).into());
        }
        self.inner.save_quiz_result(submission).await
    }
}

struct Harness {
    service: QuizSessionService,
    generator: Arc<ScriptedGenerator>,
    saver: Arc<FlakySaver>,
    app: AppServices,
}

fn harness() -> Harness {
    let storage = Storage::in_memory();
    let clock = Clock::fixed(fixed_now());
    let generator = Arc::new(ScriptedGenerator::default());
    let app = AppServices::from_storage(&storage, clock, generator.clone());
    let saver = Arc::new(FlakySaver {
        inner: app.quiz_results(),
        fail: AtomicBool::new(false),
        calls: AtomicUsize::new(0),
    });
    let service = QuizSessionService::new(clock, generator.clone(), saver.clone());
    Harness {
        service,
        generator,
        saver,
        app,
    }
}

async fn answer_all(service: &QuizSessionService, session: &mut QuizSession, correct: usize) {
    for index in 0..QUIZ_LENGTH {
        let value = if index < correct { "b" } else { "a" };
        session.answer_current(value).unwrap();
        if index + 1 < QUIZ_LENGTH {
            let outcome = service.advance(session).await.unwrap();
            assert_eq!(outcome, AdvanceOutcome::Moved { index: index + 1 });
        }
    }
}

#[tokio::test]
async fn full_quiz_is_scored_and_saved_once() {
    let h = harness();
    let mut session = QuizSession::new();
    h.service.start(&mut session).await.unwrap();
    assert_eq!(session.quiz().unwrap().len(), QUIZ_LENGTH);

    answer_all(&h.service, &mut session, 7).await;
    let outcome = h.service.advance(&mut session).await.unwrap();
    let AdvanceOutcome::Finished(result) = outcome else {
        panic!("expected the last advance to finish the quiz");
    };

    assert_eq!(result.score(), Score::from_percent(70.0));
    assert_eq!(result.attempt.correct_count(), 7);
    assert_eq!(h.saver.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.result(), Some(&result));

    let history = h.app.quiz_results().list_recent(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, result.id);
}

#[tokio::test]
async fn advance_without_answer_is_refused() {
    let h = harness();
    let mut session = QuizSession::new();
    h.service.start(&mut session).await.unwrap();

    let err = h.service.advance(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Unanswered { index: 0 }));
    assert_eq!(session.current_index(), Some(0));
}

#[tokio::test]
async fn failed_save_keeps_session_and_allows_retry() {
    let h = harness();
    let mut session = QuizSession::new();
    h.service.start(&mut session).await.unwrap();
    answer_all(&h.service, &mut session, QUIZ_LENGTH).await;

    h.saver.fail.store(true, Ordering::SeqCst);
    let err = h.service.finish(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Persistence(_)));
    assert!(session.is_in_progress());
    assert_eq!(session.current_index(), Some(QUIZ_LENGTH - 1));
    assert_eq!(session.answers().answered_count(), QUIZ_LENGTH);

    h.saver.fail.store(false, Ordering::SeqCst);
    let result = h.service.finish(&mut session).await.unwrap();
    assert_eq!(result.score(), Score::PERFECT);
    assert_eq!(h.saver.calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.app.quiz_results().list_recent(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn restart_fetches_a_new_quiz() {
    let h = harness();
    let mut session = QuizSession::new();
    h.service.start(&mut session).await.unwrap();
    let first = session.quiz().unwrap().id();
    session.answer_current("b").unwrap();

    h.service.restart(&mut session).await.unwrap();

    assert_ne!(session.quiz().unwrap().id(), first);
    assert_eq!(session.answers().answered_count(), 0);
    assert_eq!(
        session.state(),
        &SessionState::InProgress {
            current: 0,
            show_explanation: false
        }
    );
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_start_leaves_session_untouched() {
    let h = harness();
    h.generator.fail.store(true, Ordering::SeqCst);
    let mut session = QuizSession::new();

    let err = h.service.start(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::EmptyResponse)
    ));
    assert_eq!(session.state(), &SessionState::NotStarted);
}

#[tokio::test]
async fn restart_is_refused_while_submitting() {
    let h = harness();
    let mut session = QuizSession::new();
    h.service.start(&mut session).await.unwrap();
    let _pending = session.begin_submission().unwrap();

    let err = h.service.restart(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::SubmissionInFlight));
    assert!(matches!(
        h.service.finish(&mut session).await.unwrap_err(),
        SessionError::SubmissionInFlight
    ));
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.saver.calls.load(Ordering::SeqCst), 0);
}
