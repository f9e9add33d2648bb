use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nusantara_core::model::{
    Bookmark, ProgressRecord, Recipe, RecipeId, SearchFilters, UserId, UserProfile,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for recipes.
///
/// Absence of a recipe is `Ok(None)`, not an error; callers decide whether
/// that is fatal.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist or update a recipe.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the recipe cannot be stored.
    async fn upsert_recipe(&self, recipe: &Recipe) -> Result<(), StorageError>;

    /// Fetch a recipe by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError>;

    /// List recipes matching the filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_recipes(
        &self,
        filters: &SearchFilters,
        limit: u32,
    ) -> Result<Vec<Recipe>, StorageError>;

    /// List non-premium recipes for the landing view, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn featured_recipes(&self, limit: u32) -> Result<Vec<Recipe>, StorageError>;
}

/// Repository contract for bookmark membership.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert a bookmark.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the pair already exists.
    async fn add_bookmark(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        created_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Delete a bookmark. Removing an absent pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn remove_bookmark(&self, user_id: UserId, recipe_id: RecipeId)
    -> Result<(), StorageError>;

    /// Check membership for a `(user, recipe)` pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn is_bookmarked(&self, user_id: UserId, recipe_id: RecipeId)
    -> Result<bool, StorageError>;

    /// List the recipes a user has bookmarked, most recent bookmark first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_bookmarked_recipes(&self, user_id: UserId) -> Result<Vec<Recipe>, StorageError>;
}

/// Repository contract for durable cooking-progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Create-or-replace keyed `(user_id, recipe_id)`. Replacing keeps the
    /// existing row's `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Fetch the progress record for a `(user, recipe)` pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_progress(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<Option<ProgressRecord>, StorageError>;

    /// List a user's progress records, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError>;
}

/// Repository contract for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist or update a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// Fetch a profile by user ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    recipes: Arc<Mutex<HashMap<RecipeId, Recipe>>>,
    bookmarks: Arc<Mutex<HashMap<(UserId, RecipeId), Bookmark>>>,
    progress: Arc<Mutex<HashMap<(UserId, RecipeId), ProgressRecord>>>,
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl RecipeRepository for InMemoryRepository {
    async fn upsert_recipe(&self, recipe: &Recipe) -> Result<(), StorageError> {
        let mut guard = self.recipes.lock().map_err(lock_err)?;
        guard.insert(recipe.id(), recipe.clone());
        Ok(())
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError> {
        let guard = self.recipes.lock().map_err(lock_err)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_recipes(
        &self,
        filters: &SearchFilters,
        limit: u32,
    ) -> Result<Vec<Recipe>, StorageError> {
        let guard = self.recipes.lock().map_err(lock_err)?;
        let mut matched: Vec<Recipe> = guard
            .values()
            .filter(|recipe| filters.matches(recipe))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().value().cmp(&b.id().value()))
        });
        matched.truncate(limit as usize);
        Ok(matched)
    }

    async fn featured_recipes(&self, limit: u32) -> Result<Vec<Recipe>, StorageError> {
        let guard = self.recipes.lock().map_err(lock_err)?;
        let mut featured: Vec<Recipe> = guard
            .values()
            .filter(|recipe| !recipe.is_premium())
            .cloned()
            .collect();
        featured.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().value().cmp(&b.id().value()))
        });
        featured.truncate(limit as usize);
        Ok(featured)
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryRepository {
    async fn add_bookmark(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        created_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self.bookmarks.lock().map_err(lock_err)?;
        if guard.contains_key(&(user_id, recipe_id)) {
            return Err(StorageError::Conflict);
        }
        guard.insert(
            (user_id, recipe_id),
            Bookmark::new(user_id, recipe_id, created_at),
        );
        Ok(())
    }

    async fn remove_bookmark(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<(), StorageError> {
        let mut guard = self.bookmarks.lock().map_err(lock_err)?;
        guard.remove(&(user_id, recipe_id));
        Ok(())
    }

    async fn is_bookmarked(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, StorageError> {
        let guard = self.bookmarks.lock().map_err(lock_err)?;
        Ok(guard.contains_key(&(user_id, recipe_id)))
    }

    async fn list_bookmarked_recipes(&self, user_id: UserId) -> Result<Vec<Recipe>, StorageError> {
        let bookmarks = self.bookmarks.lock().map_err(lock_err)?;
        let recipes = self.recipes.lock().map_err(lock_err)?;

        let mut owned: Vec<&Bookmark> = bookmarks
            .values()
            .filter(|bookmark| bookmark.user_id == user_id)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned
            .into_iter()
            .filter_map(|bookmark| recipes.get(&bookmark.recipe_id).cloned())
            .collect())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(lock_err)?;
        let key = (record.user_id(), record.recipe_id());
        let stored = match guard.get(&key) {
            // Replace keeps the original creation time.
            Some(existing) => ProgressRecord::from_persisted(
                record.user_id(),
                record.recipe_id(),
                record.progress_percentage(),
                record.status(),
                record.rating(),
                existing.created_at(),
                record.updated_at(),
            )
            .map_err(|e| StorageError::Serialization(e.to_string()))?,
            None => record.clone(),
        };
        guard.insert(key, stored);
        Ok(())
    }

    async fn get_progress(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self.progress.lock().map_err(lock_err)?;
        Ok(guard.get(&(user_id, recipe_id)).cloned())
    }

    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self.progress.lock().map_err(lock_err)?;
        let mut records: Vec<ProgressRecord> = guard
            .values()
            .filter(|record| record.user_id() == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(records)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut guard = self.profiles.lock().map_err(lock_err)?;
        guard.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let guard = self.profiles.lock().map_err(lock_err)?;
        Ok(guard.get(&id).cloned())
    }
}

/// Aggregates the four repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub recipes: Arc<dyn RecipeRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            recipes: Arc::new(repo.clone()),
            bookmarks: Arc::new(repo.clone()),
            progress: Arc::new(repo.clone()),
            profiles: Arc::new(repo),
        }
    }
}
