use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth::AuthSession;
use crate::bookmark_service::BookmarkService;
use crate::cooking::CookingTracker;
use crate::error::{AppServicesError, RecipeServiceError};
use crate::profile_service::ProfileService;
use crate::progress_service::ProgressService;
use crate::recipe_service::RecipeService;
use nusantara_core::model::RecipeId;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: AuthSession,
    recipes: Arc<RecipeService>,
    bookmarks: Arc<BookmarkService>,
    profiles: Arc<ProfileService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over an already-constructed storage aggregate.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            auth: AuthSession::new(),
            recipes: Arc::new(RecipeService::new(Arc::clone(&storage.recipes))),
            bookmarks: Arc::new(BookmarkService::new(clock, Arc::clone(&storage.bookmarks))),
            profiles: Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles))),
            progress: Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress))),
        }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    #[must_use]
    pub fn recipes(&self) -> Arc<RecipeService> {
        Arc::clone(&self.recipes)
    }

    #[must_use]
    pub fn bookmarks(&self) -> Arc<BookmarkService> {
        Arc::clone(&self.bookmarks)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Load the recipe and open a tracker bound to the current session.
    ///
    /// # Errors
    ///
    /// Returns `RecipeServiceError::RecipeNotFound` if the recipe does not
    /// exist, or `RecipeServiceError::Storage` on repository failures.
    pub async fn start_cooking(
        &self,
        recipe_id: RecipeId,
    ) -> Result<CookingTracker, RecipeServiceError> {
        let recipe = self.recipes.get(recipe_id).await?;
        Ok(CookingTracker::new(
            &recipe,
            self.auth.clone(),
            Arc::clone(&self.progress),
        ))
    }
}
