use coach_core::model::{QuizAttempt, QuizResult, QuizResultId};

use super::{
    SqliteRepository,
    mapping::{conn, map_result_row, questions_to_json},
};
use crate::repository::{QuizResultRepository, StorageError};

#[async_trait::async_trait]
impl QuizResultRepository for SqliteRepository {
    async fn append_result(&self, attempt: &QuizAttempt) -> Result<QuizResultId, StorageError> {
        let questions_json = questions_to_json(attempt.questions())?;

        let res = sqlx::query(
            r"
                INSERT INTO quiz_results (
                    quiz_id, score, questions_json, started_at, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(attempt.quiz_id().value())
        .bind(attempt.score().percent())
        .bind(questions_json)
        .bind(attempt.started_at())
        .bind(attempt.completed_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(QuizResultId::new(res.last_insert_rowid()))
    }

    async fn get_result(&self, id: QuizResultId) -> Result<QuizResult, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, quiz_id, score, questions_json, started_at, completed_at
                FROM quiz_results
                WHERE id = ?1
            ",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_result_row(&row)
    }

    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, quiz_id, score, questions_json, started_at, completed_at
                FROM quiz_results
                ORDER BY completed_at DESC, id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_result_row).collect()
    }
}
