use std::sync::Arc;

use nusantara_core::Clock;
use nusantara_core::model::{Recipe, RecipeId, UserId};
use storage::repository::{BookmarkRepository, StorageError};

use crate::error::BookmarkError;

/// Existence-based bookmark toggling.
///
/// Two rapid toggles on the same pair are not sequenced; the last write to
/// reach storage wins, mirroring the original application.
#[derive(Clone)]
pub struct BookmarkService {
    clock: Clock,
    bookmarks: Arc<dyn BookmarkRepository>,
}

impl BookmarkService {
    #[must_use]
    pub fn new(clock: Clock, bookmarks: Arc<dyn BookmarkRepository>) -> Self {
        Self { clock, bookmarks }
    }

    /// Check membership for a `(user, recipe)` pair.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::Storage` on repository failures.
    pub async fn is_bookmarked(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, BookmarkError> {
        Ok(self.bookmarks.is_bookmarked(user_id, recipe_id).await?)
    }

    /// Flip membership; returns the new state (`true` = now bookmarked).
    ///
    /// A concurrent insert racing the membership check is treated as the
    /// toggle having already happened.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::Storage` on repository failures.
    pub async fn toggle(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, BookmarkError> {
        if self.bookmarks.is_bookmarked(user_id, recipe_id).await? {
            self.bookmarks.remove_bookmark(user_id, recipe_id).await?;
            Ok(false)
        } else {
            match self
                .bookmarks
                .add_bookmark(user_id, recipe_id, self.clock.now())
                .await
            {
                Ok(()) | Err(StorageError::Conflict) => Ok(true),
                Err(e) => Err(e.into()),
            }
        }
    }

    /// Recipes the user has bookmarked, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::Storage` on repository failures.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Recipe>, BookmarkError> {
        Ok(self.bookmarks.list_bookmarked_recipes(user_id).await?)
    }
}
