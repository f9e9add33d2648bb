use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

/// Display name given to profiles created on first sign-in.
pub const DEFAULT_DISPLAY_NAME: &str = "Pengguna Baru";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("unknown subscription code: {0}")]
    UnknownSubscription(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    Free,
    Premium,
}

impl Subscription {
    /// Storage code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Subscription::Free => "free",
            Subscription::Premium => "premium",
        }
    }

    /// Parse a storage code back into a subscription tier.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnknownSubscription` for unrecognized codes.
    pub fn from_code(code: &str) -> Result<Self, ProfileError> {
        match code {
            "free" => Ok(Subscription::Free),
            "premium" => Ok(Subscription::Premium),
            _ => Err(ProfileError::UnknownSubscription(code.to_owned())),
        }
    }
}

/// Editable profile attached to an externally-identified user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    id: UserId,
    full_name: Option<String>,
    bio: Option<String>,
    subscription: Subscription,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a profile, trimming name and bio and filtering blanks to `None`.
    #[must_use]
    pub fn new(
        id: UserId,
        full_name: Option<String>,
        bio: Option<String>,
        subscription: Subscription,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name: trim_to_option(full_name),
            bio: trim_to_option(bio),
            subscription,
            created_at,
            updated_at: created_at,
        }
    }

    /// The profile created the first time an identified user shows up.
    #[must_use]
    pub fn default_for(id: UserId, now: DateTime<Utc>) -> Self {
        Self::new(
            id,
            Some(DEFAULT_DISPLAY_NAME.to_owned()),
            None,
            Subscription::Free,
            now,
        )
    }

    /// Rehydrates a profile from storage.
    #[must_use]
    pub fn from_persisted(
        id: UserId,
        full_name: Option<String>,
        bio: Option<String>,
        subscription: Subscription,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut profile = Self::new(id, full_name, bio, subscription, created_at);
        profile.updated_at = updated_at;
        profile
    }

    /// Returns a copy with new name/bio and refreshed `updated_at`.
    #[must_use]
    pub fn with_details(
        &self,
        full_name: Option<String>,
        bio: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut profile = self.clone();
        profile.full_name = trim_to_option(full_name);
        profile.bio = trim_to_option(bio);
        profile.updated_at = now;
        profile
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    #[must_use]
    pub fn subscription(&self) -> Subscription {
        self.subscription
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

fn trim_to_option(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
