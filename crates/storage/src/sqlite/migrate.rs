use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

pub const LATEST_VERSION: i64 = 1;

/// Applies pending schema versions, recording each in `schema_migrations`.
///
/// Re-running is a no-op and never touches existing progress rows.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    ensure_version_table(pool).await?;

    let found = current_version(pool).await?;
    if found > LATEST_VERSION {
        return Err(SqliteInitError::SchemaTooNew {
            found,
            supported: LATEST_VERSION,
        });
    }

    if found < 1 {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS card_progress (
                    card_id TEXT PRIMARY KEY NOT NULL,
                    correct INTEGER NOT NULL DEFAULT 0 CHECK (correct >= 0),
                    incorrect INTEGER NOT NULL DEFAULT 0 CHECK (incorrect >= 0),
                    last_review TEXT,
                    difficulty INTEGER NOT NULL DEFAULT 0 CHECK (difficulty >= 0)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_card_progress_last_review ON card_progress (last_review);",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2) ON CONFLICT(version) DO NOTHING",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}

/// Highest recorded version; `0` when nothing has been applied.
pub async fn current_version(pool: &SqlitePool) -> Result<i64, SqliteInitError> {
    ensure_version_table(pool).await?;
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

async fn ensure_version_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL);",
    )
    .execute(pool)
    .await?;
    Ok(())
}
