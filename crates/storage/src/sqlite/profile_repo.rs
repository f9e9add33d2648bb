use nusantara_core::model::{UserId, UserProfile};

use super::SqliteRepository;
use super::mapping::map_profile_row;
use crate::repository::{ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_profiles (id, full_name, bio, subscription, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                full_name = excluded.full_name,
                bio = excluded.bio,
                subscription = excluded.subscription,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.id().to_string())
        .bind(profile.full_name())
        .bind(profile.bio())
        .bind(profile.subscription().code())
        .bind(profile.created_at())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, full_name, bio, subscription, created_at, updated_at
            FROM user_profiles WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|row| map_profile_row(&row)).transpose()
    }
}
