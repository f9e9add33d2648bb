//! Shared error types for the services crate.

use thiserror::Error;

use nusantara_core::model::{ProgressError, RecipeId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `RecipeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecipeServiceError {
    #[error("recipe {0} not found")]
    RecipeNotFound(RecipeId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `BookmarkService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookmarkError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("no progress record for recipe {0}")]
    NoRecord(RecipeId),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the cooking tracker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CookingError {
    #[error("step index {index} out of range for recipe with {steps} steps")]
    StepOutOfRange { index: usize, steps: usize },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
