use chrono::{DateTime, Utc};

use crate::model::ids::{RecipeId, UserId};

/// A user-recipe favorite marker, independent of cooking progress.
///
/// Keyed `(user_id, recipe_id)`; membership is the only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    pub user_id: UserId,
    pub recipe_id: RecipeId,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    #[must_use]
    pub fn new(user_id: UserId, recipe_id: RecipeId, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            recipe_id,
            created_at,
        }
    }
}
