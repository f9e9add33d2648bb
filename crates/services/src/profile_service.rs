use std::sync::Arc;

use nusantara_core::Clock;
use nusantara_core::model::{UserId, UserProfile};
use storage::repository::ProfileRepository;

use crate::error::ProfileServiceError;

/// Profile reads and writes, including first-visit profile creation.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }

    /// Fetch a user's profile, creating the default one on first sight.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` on repository failures.
    pub async fn load_or_create(&self, user_id: UserId) -> Result<UserProfile, ProfileServiceError> {
        if let Some(profile) = self.profiles.get_profile(user_id).await? {
            return Ok(profile);
        }

        let profile = UserProfile::default_for(user_id, self.clock.now());
        self.profiles.upsert_profile(&profile).await?;
        Ok(profile)
    }

    /// Update name and bio on an existing (or freshly created) profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` on repository failures.
    pub async fn update(
        &self,
        user_id: UserId,
        full_name: Option<String>,
        bio: Option<String>,
    ) -> Result<UserProfile, ProfileServiceError> {
        let current = self.load_or_create(user_id).await?;
        let updated = current.with_details(full_name, bio, self.clock.now());
        self.profiles.upsert_profile(&updated).await?;
        Ok(updated)
    }
}
