use chrono::{DateTime, Utc};
use sqlx::Row;
use study_core::model::{CardId, ProgressRecord};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ProgressRecord, StorageError> {
    let last_review: Option<DateTime<Utc>> = row.try_get("last_review").map_err(ser)?;
    Ok(ProgressRecord::new(
        i64_to_u32("correct", row.try_get::<i64, _>("correct").map_err(ser)?)?,
        i64_to_u32("incorrect", row.try_get::<i64, _>("incorrect").map_err(ser)?)?,
        last_review,
        i64_to_u32("difficulty", row.try_get::<i64, _>("difficulty").map_err(ser)?)?,
    ))
}

pub(crate) fn map_progress_entry(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<(CardId, ProgressRecord), StorageError> {
    // Stored keys come back verbatim; catalog ids are not normalised on load.
    let id = CardId::new(row.try_get::<String, _>("card_id").map_err(ser)?);
    Ok((id, map_progress_row(row)?))
}
