use async_trait::async_trait;

use super::{
    SqliteRepository,
    mapping::{conn, map_resume_row, ser},
};
use crate::repository::{ResumeRecord, ResumeRepository, StorageError};

#[async_trait]
impl ResumeRepository for SqliteRepository {
    async fn get_resume(&self) -> Result<Option<ResumeRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT draft_json, content, updated_at
            FROM resumes
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_resume_row).transpose()
    }

    async fn save_resume(&self, record: &ResumeRecord) -> Result<(), StorageError> {
        let draft_json = serde_json::to_string(&record.draft).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO resumes (id, draft_json, content, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                draft_json = excluded.draft_json,
                content = excluded.content,
                updated_at = excluded.updated_at
            ",
        )
        .bind(1_i64)
        .bind(draft_json)
        .bind(&record.content)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
