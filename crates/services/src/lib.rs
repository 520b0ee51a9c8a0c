#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod error;
pub mod quiz;
pub mod resume_service;

pub use coach_core::Clock;

pub use ai::{AiConfig, AiQuizGenerator, ChatClient};
pub use app_services::AppServices;
pub use error::{
    AppServicesError, GenerationError, PersistenceError, ResumeServiceError, SessionError,
};
pub use quiz::{
    AdvanceOutcome, QuizGenerator, QuizProgress, QuizResultSaver, QuizResultService, QuizSession,
    QuizSessionService, QuizSubmission, SessionState, Step,
};
pub use resume_service::ResumeService;
