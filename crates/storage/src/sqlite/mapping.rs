use chrono::{DateTime, Utc};
use coach_core::model::{
    QuestionResult, QuizAttempt, QuizId, QuizResult, QuizResultId, ResumeDraft, Score,
};
use sqlx::Row;
use uuid::Uuid;

use crate::repository::{ResumeRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn questions_to_json(questions: &[QuestionResult]) -> Result<String, StorageError> {
    serde_json::to_string(questions).map_err(ser)
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizResult, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let quiz_id: Uuid = row.try_get("quiz_id").map_err(ser)?;
    let score: f64 = row.try_get("score").map_err(ser)?;
    let questions_json: String = row.try_get("questions_json").map_err(ser)?;
    let started_at: DateTime<Utc> = row.try_get("started_at").map_err(ser)?;
    let completed_at: DateTime<Utc> = row.try_get("completed_at").map_err(ser)?;

    let questions: Vec<QuestionResult> = serde_json::from_str(&questions_json).map_err(ser)?;
    let attempt = QuizAttempt::from_persisted(
        QuizId::from_uuid(quiz_id),
        Score::from_percent(score),
        questions,
        started_at,
        completed_at,
    )
    .map_err(ser)?;

    Ok(QuizResult::new(QuizResultId::new(id), attempt))
}

pub(crate) fn map_resume_row(row: &sqlx::sqlite::SqliteRow) -> Result<ResumeRecord, StorageError> {
    let draft_json: String = row.try_get("draft_json").map_err(ser)?;
    let draft: ResumeDraft = serde_json::from_str(&draft_json).map_err(ser)?;
    Ok(ResumeRecord {
        draft,
        content: row.try_get("content").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}
