use std::sync::Arc;

use nusantara_core::model::{Recipe, RecipeId, SearchFilters};
use storage::repository::RecipeRepository;

use crate::error::RecipeServiceError;

/// Default number of recipes shown on the landing view.
pub const FEATURED_LIMIT: u32 = 6;

/// Default page size for recipe listings.
pub const LIST_LIMIT: u32 = 100;

/// Read-side queries over the recipe catalog.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    #[must_use]
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    /// List recipes matching the filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RecipeServiceError::Storage` on repository failures.
    pub async fn list(
        &self,
        filters: &SearchFilters,
        limit: u32,
    ) -> Result<Vec<Recipe>, RecipeServiceError> {
        Ok(self.recipes.list_recipes(filters, limit).await?)
    }

    /// Fetch one recipe; absence is an error at this layer.
    ///
    /// # Errors
    ///
    /// Returns `RecipeServiceError::RecipeNotFound` if the id is unknown,
    /// or `RecipeServiceError::Storage` on repository failures.
    pub async fn get(&self, id: RecipeId) -> Result<Recipe, RecipeServiceError> {
        self.recipes
            .get_recipe(id)
            .await?
            .ok_or(RecipeServiceError::RecipeNotFound(id))
    }

    /// Non-premium recipes for the landing view.
    ///
    /// # Errors
    ///
    /// Returns `RecipeServiceError::Storage` on repository failures.
    pub async fn featured(&self, limit: u32) -> Result<Vec<Recipe>, RecipeServiceError> {
        Ok(self.recipes.featured_recipes(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusantara_core::model::{Difficulty, Region};
    use nusantara_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    fn build_recipe(title: &str, premium: bool) -> Recipe {
        Recipe::new(
            RecipeId::random(),
            title,
            "",
            Region::Jawa,
            Difficulty::Easy,
            45,
            2,
            None,
            Vec::new(),
            vec!["Masak.".into()],
            None,
            premium,
            fixed_now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn get_maps_absence_to_not_found() {
        let repo = InMemoryRepository::new();
        let service = RecipeService::new(Arc::new(repo));

        let id = RecipeId::random();
        let err = service.get(id).await.unwrap_err();
        assert!(matches!(err, RecipeServiceError::RecipeNotFound(found) if found == id));
    }

    struct FailingRecipes;

    #[async_trait::async_trait]
    impl storage::repository::RecipeRepository for FailingRecipes {
        async fn upsert_recipe(&self, _recipe: &Recipe) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn get_recipe(&self, _id: RecipeId) -> Result<Option<Recipe>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn list_recipes(
            &self,
            _filters: &SearchFilters,
            _limit: u32,
        ) -> Result<Vec<Recipe>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn featured_recipes(&self, _limit: u32) -> Result<Vec<Recipe>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
    }

    #[tokio::test]
    async fn storage_failures_surface_as_storage_errors() {
        let service = RecipeService::new(Arc::new(FailingRecipes));
        let err = service.get(RecipeId::random()).await.unwrap_err();
        assert!(matches!(err, RecipeServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn featured_skips_premium() {
        let repo = InMemoryRepository::new();
        use storage::repository::RecipeRepository as _;
        repo.upsert_recipe(&build_recipe("Gudeg", false)).await.unwrap();
        repo.upsert_recipe(&build_recipe("Coto", true)).await.unwrap();

        let service = RecipeService::new(Arc::new(repo));
        let featured = service.featured(FEATURED_LIMIT).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title(), "Gudeg");
    }
}
