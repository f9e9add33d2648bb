use thiserror::Error;

use crate::model::{ProfileError, ProgressError, RecipeError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
