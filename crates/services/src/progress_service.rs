use std::sync::Arc;

use nusantara_core::Clock;
use nusantara_core::model::{ProgressRecord, ProgressStatus, RecipeId, UserId};
use serde::Serialize;
use storage::repository::ProgressRepository;

use crate::error::ProgressServiceError;

/// Aggregate view of a user's cooking history, for the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_percentage: f32,
}

/// Persists derived cooking progress and answers history queries.
///
/// The status label is always recomputed from the percentage on write, so a
/// stored row can never violate the status/percentage invariant.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl std::fmt::Debug for ProgressService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Upsert the progress row for `(user, recipe)` with a fresh percentage.
    ///
    /// An existing row keeps its creation time and rating; only percentage,
    /// status and `updated_at` change.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` for invalid percentages and
    /// `ProgressServiceError::Storage` on repository failures.
    pub async fn record(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        percentage: f32,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let now = self.clock.now();
        let record = match self.progress.get_progress(user_id, recipe_id).await? {
            Some(existing) => existing.with_percentage(percentage, now)?,
            None => ProgressRecord::new(user_id, recipe_id, percentage, None, now)?,
        };
        self.progress.upsert_progress(&record).await?;
        Ok(record)
    }

    /// Attach a 1–5 rating to an existing progress row.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::NoRecord` if the user has no progress
    /// for this recipe yet, `ProgressServiceError::Progress` for invalid
    /// ratings, and `ProgressServiceError::Storage` on repository failures.
    pub async fn record_rating(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        rating: u8,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let existing = self
            .progress
            .get_progress(user_id, recipe_id)
            .await?
            .ok_or(ProgressServiceError::NoRecord(recipe_id))?;
        let updated = existing.with_rating(rating, self.clock.now())?;
        self.progress.upsert_progress(&updated).await?;
        Ok(updated)
    }

    /// A user's progress rows, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on repository failures.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ProgressRecord>, ProgressServiceError> {
        Ok(self.progress.list_progress(user_id).await?)
    }

    /// Aggregate counts and average percentage across a user's rows.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` on repository failures.
    pub async fn stats(&self, user_id: UserId) -> Result<ProgressStats, ProgressServiceError> {
        let records = self.list_for_user(user_id).await?;

        let total = records.len();
        let completed = records
            .iter()
            .filter(|r| r.status() == ProgressStatus::Completed)
            .count();
        let in_progress = records
            .iter()
            .filter(|r| r.status() == ProgressStatus::Attempted)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let average_percentage = if total == 0 {
            0.0
        } else {
            records.iter().map(ProgressRecord::progress_percentage).sum::<f32>() / total as f32
        };

        Ok(ProgressStats {
            total,
            completed,
            in_progress,
            average_percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusantara_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> ProgressService {
        ProgressService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn record_derives_status() {
        let service = service();
        let user = UserId::random();
        let recipe = RecipeId::random();

        let record = service.record(user, recipe, 50.0).await.unwrap();
        assert_eq!(record.status(), ProgressStatus::Attempted);

        let record = service.record(user, recipe, 100.0).await.unwrap();
        assert_eq!(record.status(), ProgressStatus::Completed);

        let record = service.record(user, recipe, 0.0).await.unwrap();
        assert_eq!(record.status(), ProgressStatus::Bookmarked);
    }

    #[tokio::test]
    async fn record_rejects_out_of_range() {
        let service = service();
        let err = service
            .record(UserId::random(), RecipeId::random(), 150.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressServiceError::Progress(_)));
    }

    #[tokio::test]
    async fn rating_requires_existing_record() {
        let service = service();
        let user = UserId::random();
        let recipe = RecipeId::random();

        let err = service.record_rating(user, recipe, 4).await.unwrap_err();
        assert!(matches!(err, ProgressServiceError::NoRecord(_)));

        service.record(user, recipe, 100.0).await.unwrap();
        let rated = service.record_rating(user, recipe, 4).await.unwrap();
        assert_eq!(rated.rating(), Some(4));
    }

    #[tokio::test]
    async fn stats_aggregate_rows() {
        let service = service();
        let user = UserId::random();

        service.record(user, RecipeId::random(), 100.0).await.unwrap();
        service.record(user, RecipeId::random(), 50.0).await.unwrap();
        service.record(user, RecipeId::random(), 0.0).await.unwrap();

        let stats = service.stats(user).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert!((stats.average_percentage - 50.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn stats_for_empty_history() {
        let service = service();
        let stats = service.stats(UserId::random()).await.unwrap();
        assert_eq!(stats.total, 0);
        assert!((stats.average_percentage - 0.0).abs() < f32::EPSILON);
    }
}
