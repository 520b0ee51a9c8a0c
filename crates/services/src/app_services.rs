use std::sync::Arc;

use coach_core::model::CareerProfile;
use storage::repository::Storage;

use crate::Clock;
use crate::ai::{AiConfig, AiQuizGenerator, ChatClient};
use crate::error::AppServicesError;
use crate::quiz::{QuizGenerator, QuizResultSaver, QuizResultService, QuizSessionService};
use crate::resume_service::ResumeService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_sessions: Arc<QuizSessionService>,
    quiz_results: Arc<QuizResultService>,
    resumes: Arc<ResumeService>,
    generation_enabled: bool,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the AI quiz generator.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        ai: Option<AiConfig>,
        profile: Option<CareerProfile>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let generator = AiQuizGenerator::new(ChatClient::new(ai), profile);
        let enabled = generator.enabled();
        Ok(Self::from_storage(&storage, clock, Arc::new(generator)).with_generation_enabled(enabled))
    }

    /// Wire services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        generator: Arc<dyn QuizGenerator>,
    ) -> Self {
        let quiz_results = Arc::new(QuizResultService::new(
            clock,
            Arc::clone(&storage.quiz_results),
        ));
        let saver: Arc<dyn QuizResultSaver> = quiz_results.clone();
        let quiz_sessions = Arc::new(QuizSessionService::new(clock, generator, saver));
        let resumes = Arc::new(ResumeService::new(clock, Arc::clone(&storage.resumes)));

        Self {
            quiz_sessions,
            quiz_results,
            resumes,
            generation_enabled: true,
        }
    }

    #[must_use]
    pub fn with_generation_enabled(mut self, enabled: bool) -> Self {
        self.generation_enabled = enabled;
        self
    }

    /// False when no AI endpoint is configured; starting a quiz will fail.
    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }

    #[must_use]
    pub fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_sessions)
    }

    #[must_use]
    pub fn quiz_results(&self) -> Arc<QuizResultService> {
        Arc::clone(&self.quiz_results)
    }

    #[must_use]
    pub fn resumes(&self) -> Arc<ResumeService> {
        Arc::clone(&self.resumes)
    }
}
