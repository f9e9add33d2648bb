mod bookmark;
mod filters;
mod ids;
mod profile;
mod progress;
mod recipe;

pub use bookmark::Bookmark;
pub use filters::SearchFilters;
pub use ids::{ParseIdError, RecipeId, UserId};
pub use profile::{DEFAULT_DISPLAY_NAME, ProfileError, Subscription, UserProfile};
pub use progress::{ProgressError, ProgressRecord, ProgressStatus};
pub use recipe::{Difficulty, Recipe, RecipeError, Region};
