use chrono::{DateTime, Utc};
use nusantara_core::model::{Recipe, RecipeId, UserId};
use sqlx::error::ErrorKind;

use super::SqliteRepository;
use super::mapping::map_recipe_row;
use crate::repository::{BookmarkRepository, StorageError};

fn insert_err(e: sqlx::Error) -> StorageError {
    if e.as_database_error()
        .is_some_and(|db| db.kind() == ErrorKind::UniqueViolation)
    {
        StorageError::Conflict
    } else {
        StorageError::Connection(e.to_string())
    }
}

#[async_trait::async_trait]
impl BookmarkRepository for SqliteRepository {
    async fn add_bookmark(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        created_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_bookmarks (user_id, recipe_id, created_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        Ok(())
    }

    async fn remove_bookmark(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            DELETE FROM user_bookmarks WHERE user_id = ?1 AND recipe_id = ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn is_bookmarked(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, StorageError> {
        let row = sqlx::query(
            r"
            SELECT 1 FROM user_bookmarks WHERE user_id = ?1 AND recipe_id = ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn list_bookmarked_recipes(&self, user_id: UserId) -> Result<Vec<Recipe>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT r.id, r.title, r.description, r.region, r.difficulty,
                   r.cooking_time_minutes, r.servings, r.image_url, r.ingredients,
                   r.steps, r.cultural_story, r.is_premium, r.created_at, r.updated_at
            FROM user_bookmarks b
            JOIN recipes r ON r.id = b.recipe_id
            WHERE b.user_id = ?1
            ORDER BY b.created_at DESC, r.id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            recipes.push(map_recipe_row(&row)?);
        }
        Ok(recipes)
    }
}
