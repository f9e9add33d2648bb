use nusantara_core::model::{Recipe, RecipeId, SearchFilters};

use super::SqliteRepository;
use super::mapping::{list_to_json, map_recipe_row};
use crate::repository::{RecipeRepository, StorageError};

const RECIPE_COLUMNS: &str = "id, title, description, region, difficulty, cooking_time_minutes, \
     servings, image_url, ingredients, steps, cultural_story, is_premium, created_at, updated_at";

#[async_trait::async_trait]
impl RecipeRepository for SqliteRepository {
    async fn upsert_recipe(&self, recipe: &Recipe) -> Result<(), StorageError> {
        let ingredients = list_to_json(recipe.ingredients())?;
        let steps = list_to_json(recipe.steps())?;

        sqlx::query(
            r"
            INSERT INTO recipes (id, title, description, region, difficulty,
                cooking_time_minutes, servings, image_url, ingredients, steps,
                cultural_story, is_premium, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                region = excluded.region,
                difficulty = excluded.difficulty,
                cooking_time_minutes = excluded.cooking_time_minutes,
                servings = excluded.servings,
                image_url = excluded.image_url,
                ingredients = excluded.ingredients,
                steps = excluded.steps,
                cultural_story = excluded.cultural_story,
                is_premium = excluded.is_premium,
                updated_at = excluded.updated_at
            ",
        )
        .bind(recipe.id().to_string())
        .bind(recipe.title())
        .bind(recipe.description())
        .bind(recipe.region().code())
        .bind(recipe.difficulty().code())
        .bind(i64::from(recipe.cooking_time_minutes()))
        .bind(i64::from(recipe.servings()))
        .bind(recipe.image_url().map(ToString::to_string))
        .bind(ingredients)
        .bind(steps)
        .bind(recipe.cultural_story())
        .bind(i64::from(recipe.is_premium()))
        .bind(recipe.created_at())
        .bind(recipe.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|row| map_recipe_row(&row)).transpose()
    }

    async fn list_recipes(
        &self,
        filters: &SearchFilters,
        limit: u32,
    ) -> Result<Vec<Recipe>, StorageError> {
        let mut sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE 1 = 1");
        if filters.region().is_some() {
            sql.push_str(" AND region = ?");
        }
        if filters.difficulty().is_some() {
            sql.push_str(" AND difficulty = ?");
        }
        if filters.query().is_some() {
            sql.push_str(" AND lower(title) LIKE ?");
        }
        sql.push_str(" ORDER BY created_at DESC, id ASC LIMIT ?");

        let mut query = sqlx::query(&sql);
        if let Some(region) = filters.region() {
            query = query.bind(region.code());
        }
        if let Some(difficulty) = filters.difficulty() {
            query = query.bind(difficulty.code());
        }
        if let Some(text) = filters.query() {
            query = query.bind(format!("%{}%", text.to_lowercase()));
        }
        let rows = query
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            recipes.push(map_recipe_row(&row)?);
        }
        Ok(recipes)
    }

    async fn featured_recipes(&self, limit: u32) -> Result<Vec<Recipe>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE is_premium = 0 \
             ORDER BY created_at DESC, id ASC LIMIT ?1"
        ))
        .bind(i64::from(limit))
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
