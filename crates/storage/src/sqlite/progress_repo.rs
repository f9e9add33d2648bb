use nusantara_core::model::{ProgressRecord, RecipeId, UserId};

use super::SqliteRepository;
use super::mapping::map_progress_row;
use crate::repository::{ProgressRepository, StorageError};

const PROGRESS_COLUMNS: &str =
    "user_id, recipe_id, progress_percentage, status, rating, created_at, updated_at";

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        // created_at is deliberately not part of the UPDATE set: replacing a
        // row keeps the original creation time.
        sqlx::query(
            r"
            INSERT INTO user_progress (user_id, recipe_id, progress_percentage,
                status, rating, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id, recipe_id) DO UPDATE SET
                progress_percentage = excluded.progress_percentage,
                status = excluded.status,
                rating = excluded.rating,
                updated_at = excluded.updated_at
            ",
        )
        .bind(record.user_id().to_string())
        .bind(record.recipe_id().to_string())
        .bind(f64::from(record.progress_percentage()))
        .bind(record.status().code())
        .bind(record.rating().map(i64::from))
        .bind(record.created_at())
        .bind(record.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_progress(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress \
             WHERE user_id = ?1 AND recipe_id = ?2"
        ))
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|row| map_progress_row(&row)).transpose()
    }

    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress \
             WHERE user_id = ?1 ORDER BY updated_at DESC, recipe_id ASC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_progress_row(&row)?);
        }
        Ok(records)
    }
}
