use std::sync::Arc;

use coach_core::model::{
    AnswerSet, ContactInfo, Question, Quiz, QuizAttempt, QuizResult, QuizResultId, ResumeDraft,
    calculate_score,
};
use coach_core::time::fixed_now;
use storage::repository::{
    InMemoryRepository, QuizResultRepository, ResumeRecord, ResumeRepository, Storage,
    StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn attempt(answers: &[Option<&str>]) -> QuizAttempt {
    let questions = answers
        .iter()
        .enumerate()
        .map(|(i, _)| {
            Question::new(format!("Question {i}"), vec!["a".into(), "b".into()], "a", "because")
                .unwrap()
        })
        .collect();
    let quiz = Quiz::new(questions).unwrap();
    let answers = AnswerSet::from_slots(answers.iter().map(|a| a.map(str::to_string)).collect());
    let score = calculate_score(&quiz, &answers);
    QuizAttempt::grade(&quiz, &answers, score, fixed_now(), fixed_now()).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_stats() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .storage
        .quiz_results
        .append_result(&attempt(&[Some("a"), Some("b")]))
        .await
        .expect("append result");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Average Score"), "missing stats in {html}");
    assert!(html.contains("50.0%"), "missing score in {html}");
    assert!(html.contains("Start Quiz"), "missing quiz link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No quizzes taken yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_result_card() {
    let mut harness = setup_view_harness(ViewKind::History);
    harness
        .storage
        .quiz_results
        .append_result(&attempt(&[Some("a"), Some("a")]))
        .await
        .expect("append result");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Score: 100.0%"), "missing score in {html}");
    assert!(html.contains("2 / 2 correct"), "missing counts in {html}");
    assert!(html.contains("View"), "missing view link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_review() {
    let storage = Storage::in_memory();
    let id = storage
        .quiz_results
        .append_result(&attempt(&[Some("a"), None]))
        .await
        .expect("append result");

    let mut harness = setup_view_harness_with_storage(ViewKind::Result(id.value()), storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz Results"), "missing title in {html}");
    assert!(html.contains("Question Review"), "missing review in {html}");
    assert!(html.contains("Not answered"), "missing unanswered marker in {html}");
    assert!(html.contains("Correct answer: a"), "missing correction in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_not_found() {
    let mut harness = setup_view_harness(ViewKind::Result(404));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("could not be found"), "missing not-found in {html}");
}

#[test]
fn quiz_view_smoke_renders_intro() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Ready to test your knowledge?"), "missing intro in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn resume_view_smoke_loads_saved_resume() {
    let storage = Storage::in_memory();
    let draft = ResumeDraft {
        contact_info: ContactInfo {
            email: "dev@example.com".into(),
            ..ContactInfo::default()
        },
        summary: "Backend engineer".into(),
        skills: "Rust".into(),
        ..ResumeDraft::default()
    };
    let record = ResumeRecord::from_resume(&draft.validate().unwrap(), fixed_now());
    storage.resumes.save_resume(&record).await.expect("save resume");

    let mut harness = setup_view_harness_with_storage(ViewKind::Resume, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Resume Builder"), "missing title in {html}");
    assert!(html.contains("dev@example.com"), "missing email in {html}");
    assert!(html.contains("Add Experience"), "missing entry controls in {html}");
}

struct FailingResults;

#[async_trait::async_trait]
impl QuizResultRepository for FailingResults {
    async fn append_result(&self, _attempt: &QuizAttempt) -> Result<QuizResultId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_result(&self, _id: QuizResultId) -> Result<QuizResult, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_results(&self, _limit: u32) -> Result<Vec<QuizResult>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_error_state() {
    let storage = Storage {
        quiz_results: Arc::new(FailingResults),
        resumes: Arc::new(InMemoryRepository::new()),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::History, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}
