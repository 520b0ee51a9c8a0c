use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coach_core::model::{QuizAttempt, QuizResult, QuizResultId, Resume, ResumeDraft};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the user's resume.
///
/// `content` is the rendered Markdown; `draft` keeps the structured form
/// values so the builder can be repopulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRecord {
    pub draft: ResumeDraft,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    #[must_use]
    pub fn from_resume(resume: &Resume, updated_at: DateTime<Utc>) -> Self {
        Self {
            draft: resume.draft().clone(),
            content: resume.to_markdown(),
            updated_at,
        }
    }
}

/// Repository contract for finished quiz attempts.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Store a graded attempt and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_result(&self, attempt: &QuizAttempt) -> Result<QuizResultId, StorageError>;

    /// Fetch a stored result by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_result(&self, id: QuizResultId) -> Result<QuizResult, StorageError>;

    /// Most recent results first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError>;
}

/// Repository contract for the single stored resume.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn get_resume(&self) -> Result<Option<ResumeRecord>, StorageError>;

    /// Insert or replace the stored resume.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_resume(&self, record: &ResumeRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<BTreeMap<QuizResultId, QuizAttempt>>>,
    resume: Arc<Mutex<Option<ResumeRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn append_result(&self, attempt: &QuizAttempt) -> Result<QuizResultId, StorageError> {
        let mut guard = self.results.lock().map_err(poisoned)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = QuizResultId::new(next);
        guard.insert(id, attempt.clone());
        Ok(id)
    }

    async fn get_result(&self, id: QuizResultId) -> Result<QuizResult, StorageError> {
        let guard = self.results.lock().map_err(poisoned)?;
        guard
            .get(&id)
            .cloned()
            .map(|attempt| QuizResult::new(id, attempt))
            .ok_or(StorageError::NotFound)
    }

    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self.results.lock().map_err(poisoned)?;
        let mut out: Vec<QuizResult> = guard
            .iter()
            .map(|(id, attempt)| QuizResult::new(*id, attempt.clone()))
            .collect();
        out.sort_by(|a, b| {
            b.completed_at()
                .cmp(&a.completed_at())
                .then_with(|| b.id.cmp(&a.id))
        });
        out.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(out)
    }
}

#[async_trait]
impl ResumeRepository for InMemoryRepository {
    async fn get_resume(&self) -> Result<Option<ResumeRecord>, StorageError> {
        let guard = self.resume.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn save_resume(&self, record: &ResumeRecord) -> Result<(), StorageError> {
        let mut guard = self.resume.lock().map_err(poisoned)?;
        *guard = Some(record.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quiz_results: Arc<dyn QuizResultRepository>,
    pub resumes: Arc<dyn ResumeRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let quiz_results: Arc<dyn QuizResultRepository> = Arc::new(repo.clone());
        let resumes: Arc<dyn ResumeRepository> = Arc::new(repo);
        Self {
            quiz_results,
            resumes,
        }
    }
}
