use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Applies any pending schema migrations, tracked in `schema_migrations`.
///
/// Version 1 creates the full schema (recipes, bookmarks, progress records,
/// user profiles, and indexes). Ids are UUIDs stored as TEXT; ingredient and
/// step lists are JSON arrays stored as TEXT. Later versions append here.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS recipes (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    region TEXT NOT NULL,
                    difficulty TEXT NOT NULL,
                    cooking_time_minutes INTEGER NOT NULL CHECK (cooking_time_minutes > 0),
                    servings INTEGER NOT NULL CHECK (servings > 0),
                    image_url TEXT,
                    ingredients TEXT NOT NULL,
                    steps TEXT NOT NULL,
                    cultural_story TEXT,
                    is_premium INTEGER NOT NULL CHECK (is_premium IN (0, 1)),
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_bookmarks (
                    user_id TEXT NOT NULL,
                    recipe_id TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, recipe_id),
                    FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_progress (
                    user_id TEXT NOT NULL,
                    recipe_id TEXT NOT NULL,
                    progress_percentage REAL NOT NULL
                        CHECK (progress_percentage >= 0 AND progress_percentage <= 100),
                    status TEXT NOT NULL
                        CHECK (status IN ('bookmarked', 'attempted', 'completed')),
                    rating INTEGER CHECK (rating BETWEEN 1 AND 5),
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, recipe_id),
                    FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_profiles (
                    id TEXT PRIMARY KEY,
                    full_name TEXT,
                    bio TEXT,
                    subscription TEXT NOT NULL CHECK (subscription IN ('free', 'premium')),
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_recipes_region_difficulty
                    ON recipes (region, difficulty);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_recipes_created
                    ON recipes (created_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_user_bookmarks_user_created
                    ON user_bookmarks (user_id, created_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_user_progress_user_updated
                    ON user_progress (user_id, updated_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
