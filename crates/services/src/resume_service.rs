use std::sync::Arc;

use tracing::info;

use coach_core::model::ResumeDraft;
use storage::repository::{ResumeRecord, ResumeRepository};

use crate::Clock;
use crate::error::ResumeServiceError;

/// Loads and saves the user's single resume.
#[derive(Clone)]
pub struct ResumeService {
    clock: Clock,
    repo: Arc<dyn ResumeRepository>,
}

impl ResumeService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ResumeRepository>) -> Self {
        Self { clock, repo }
    }

    /// The stored resume, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `ResumeServiceError::Storage` on read failures.
    pub async fn load(&self) -> Result<Option<ResumeRecord>, ResumeServiceError> {
        Ok(self.repo.get_resume().await?)
    }

    /// Validate the draft, render it and replace the stored resume.
    ///
    /// # Errors
    ///
    /// Returns `ResumeServiceError::Validation` with every field error, or
    /// `Storage` if the record cannot be written.
    pub async fn save(&self, draft: ResumeDraft) -> Result<ResumeRecord, ResumeServiceError> {
        let resume = draft.validate()?;
        let record = ResumeRecord::from_resume(&resume, self.clock.now());
        self.repo.save_resume(&record).await?;
        info!(bytes = record.content.len(), "resume saved");
        Ok(record)
    }
}
