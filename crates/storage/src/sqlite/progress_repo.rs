use async_trait::async_trait;
use study_core::model::{CardId, ProgressRecord};

use super::SqliteRepository;
use super::mapping::{map_progress_entry, map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self, id: &CardId) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT correct, incorrect, last_review, difficulty
            FROM card_progress
            WHERE card_id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn list_progress(&self) -> Result<Vec<(CardId, ProgressRecord)>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT card_id, correct, incorrect, last_review, difficulty
            FROM card_progress
            ORDER BY card_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter().map(map_progress_entry).collect()
    }

    async fn upsert_progress(
        &self,
        id: &CardId,
        record: &ProgressRecord,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO card_progress (card_id, correct, incorrect, last_review, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(card_id) DO UPDATE SET
                correct = excluded.correct,
                incorrect = excluded.incorrect,
                last_review = excluded.last_review,
                difficulty = excluded.difficulty
            ",
        )
        .bind(id.as_str())
        .bind(i64::from(record.correct))
        .bind(i64::from(record.incorrect))
        .bind(record.last_review)
        .bind(i64::from(record.difficulty))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
