mod progress;
mod session;
mod tracker;

// Public API of the cooking subsystem.
pub use crate::error::CookingError;
pub use progress::CookingProgress;
pub use session::CookingSession;
pub use tracker::CookingTracker;
