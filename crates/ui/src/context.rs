use std::sync::Arc;

use services::{AppServices, QuizResultService, QuizSessionService, ResumeService};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn quiz_sessions(&self) -> Arc<QuizSessionService>;
    fn quiz_results(&self) -> Arc<QuizResultService>;
    fn resumes(&self) -> Arc<ResumeService>;

    /// False when no quiz generator is configured.
    fn generation_enabled(&self) -> bool;
}

impl UiApp for AppServices {
    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        AppServices::quiz_sessions(self)
    }

    fn quiz_results(&self) -> Arc<QuizResultService> {
        AppServices::quiz_results(self)
    }

    fn resumes(&self) -> Arc<ResumeService> {
        AppServices::resumes(self)
    }

    fn generation_enabled(&self) -> bool {
        AppServices::generation_enabled(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz_sessions: Arc<QuizSessionService>,
    quiz_results: Arc<QuizResultService>,
    resumes: Arc<ResumeService>,
    generation_enabled: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_sessions: app.quiz_sessions(),
            quiz_results: app.quiz_results(),
            resumes: app.resumes(),
            generation_enabled: app.generation_enabled(),
        }
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

    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
