use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{RecipeId, UserId};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("progress percentage must be a finite value in [0, 100], got {0}")]
    InvalidPercentage(f32),

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("status {status:?} does not match percentage {percentage}")]
    StatusMismatch {
        status: ProgressStatus,
        percentage: f32,
    },

    #[error("unknown status code: {0}")]
    UnknownStatus(String),
}

/// Coarse label derived from the progress percentage.
///
/// The mapping is an invariant of the stored record: `Completed` iff the
/// percentage is at least 100, `Attempted` iff strictly between 0 and 100,
/// `Bookmarked` iff exactly 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Bookmarked,
    Attempted,
    Completed,
}

impl ProgressStatus {
    /// Derives the status for a given percentage.
    #[must_use]
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= 100.0 {
            ProgressStatus::Completed
        } else if percentage > 0.0 {
            ProgressStatus::Attempted
        } else {
            ProgressStatus::Bookmarked
        }
    }

    /// Storage code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ProgressStatus::Bookmarked => "bookmarked",
            ProgressStatus::Attempted => "attempted",
            ProgressStatus::Completed => "completed",
        }
    }

    /// Parse a storage code back into a status.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStatus` for unrecognized codes.
    pub fn from_code(code: &str) -> Result<Self, ProgressError> {
        match code {
            "bookmarked" => Ok(ProgressStatus::Bookmarked),
            "attempted" => Ok(ProgressStatus::Attempted),
            "completed" => Ok(ProgressStatus::Completed),
            _ => Err(ProgressError::UnknownStatus(code.to_owned())),
        }
    }
}

/// Durable cooking-progress row, keyed `(user_id, recipe_id)`.
///
/// Only the derived percentage is persisted, never the completed-step set
/// itself; a fresh viewing session always starts from an empty set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    user_id: UserId,
    recipe_id: RecipeId,
    progress_percentage: f32,
    status: ProgressStatus,
    rating: Option<u8>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Creates a record, deriving the status from the percentage so the
    /// status/percentage invariant holds by construction.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidPercentage` for non-finite or
    /// out-of-range percentages, or `ProgressError::InvalidRating` if a
    /// rating outside 1..=5 is supplied.
    pub fn new(
        user_id: UserId,
        recipe_id: RecipeId,
        progress_percentage: f32,
        rating: Option<u8>,
        now: DateTime<Utc>,
    ) -> Result<Self, ProgressError> {
        if !progress_percentage.is_finite()
            || !(0.0..=100.0).contains(&progress_percentage)
        {
            return Err(ProgressError::InvalidPercentage(progress_percentage));
        }
        if let Some(rating) = rating {
            if !(1..=5).contains(&rating) {
                return Err(ProgressError::InvalidRating(rating));
            }
        }

        Ok(Self {
            user_id,
            recipe_id,
            progress_percentage,
            status: ProgressStatus::from_percentage(progress_percentage),
            rating,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a record from storage, re-checking the invariant.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::StatusMismatch` if the stored status disagrees
    /// with the stored percentage, plus the validation errors of [`Self::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        user_id: UserId,
        recipe_id: RecipeId,
        progress_percentage: f32,
        status: ProgressStatus,
        rating: Option<u8>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ProgressError> {
        let mut record = Self::new(user_id, recipe_id, progress_percentage, rating, created_at)?;
        if record.status != status {
            return Err(ProgressError::StatusMismatch {
                status,
                percentage: progress_percentage,
            });
        }
        record.updated_at = updated_at;
        Ok(record)
    }

    /// Returns a copy with a refreshed percentage and `updated_at`, keeping
    /// the original `created_at` (upsert semantics).
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidPercentage` as in [`Self::new`].
    pub fn with_percentage(
        &self,
        progress_percentage: f32,
        now: DateTime<Utc>,
    ) -> Result<Self, ProgressError> {
        let mut record = Self::new(
            self.user_id,
            self.recipe_id,
            progress_percentage,
            self.rating,
            self.created_at,
        )?;
        record.updated_at = now;
        Ok(record)
    }

    /// Returns a copy with a new rating and refreshed `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidRating` if outside 1..=5.
    pub fn with_rating(&self, rating: u8, now: DateTime<Utc>) -> Result<Self, ProgressError> {
        if !(1..=5).contains(&rating) {
            return Err(ProgressError::InvalidRating(rating));
        }
        let mut record = self.clone();
        record.rating = Some(rating);
        record.updated_at = now;
        Ok(record)
    }

    // Accessors
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    #[must_use]
    pub fn progress_percentage(&self) -> f32 {
        self.progress_percentage
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    #[must_use]
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
