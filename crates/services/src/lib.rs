#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod bookmark_service;
pub mod cooking;
pub mod error;
pub mod profile_service;
pub mod progress_service;
pub mod recipe_service;

pub use nusantara_core::Clock;

pub use error::{
    AppServicesError, BookmarkError, CookingError, ProfileServiceError, ProgressServiceError,
    RecipeServiceError,
};

pub use app_services::AppServices;
pub use auth::{AuthSession, AuthSessionClosed, AuthSubscription, AuthUser};
pub use bookmark_service::BookmarkService;
pub use cooking::{CookingProgress, CookingSession, CookingTracker};
pub use profile_service::ProfileService;
pub use progress_service::{ProgressService, ProgressStats};
pub use recipe_service::RecipeService;
