use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;
use nusantara_core::model::{Recipe, RecipeId};
use tokio::task::JoinHandle;

use super::progress::CookingProgress;
use super::session::CookingSession;
use crate::auth::AuthSession;
use crate::error::CookingError;
use crate::progress_service::ProgressService;

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Binds a [`CookingSession`] to the signed-in user and persists its
/// percentage in the background.
///
/// Every toggle updates the local checklist immediately. When a user is
/// signed in, the new percentage is written through [`ProgressService`] on a
/// spawned task so the caller never waits on storage; write failures are
/// logged and the checklist stays authoritative for the running session.
/// Without a signed-in user the checklist still works, nothing is persisted.
#[derive(Debug)]
pub struct CookingTracker {
    session: CookingSession,
    auth: AuthSession,
    progress: Arc<ProgressService>,
    alive: Arc<AtomicBool>,
    last_persist: Option<JoinHandle<()>>,
}

impl CookingTracker {
    #[must_use]
    pub fn new(recipe: &Recipe, auth: AuthSession, progress: Arc<ProgressService>) -> Self {
        Self {
            session: CookingSession::new(recipe),
            auth,
            progress,
            alive: Arc::new(AtomicBool::new(true)),
            last_persist: None,
        }
    }

    #[must_use]
    pub fn recipe_id(&self) -> RecipeId {
        self.session.recipe_id()
    }

    #[must_use]
    pub fn session(&self) -> &CookingSession {
        &self.session
    }

    #[must_use]
    pub fn progress(&self) -> CookingProgress {
        self.session.progress()
    }

    /// Flip one step and schedule a background write of the new percentage.
    ///
    /// Returns the step's new done-ness. The local checklist is updated even
    /// when no user is signed in; only the write is skipped.
    ///
    /// # Errors
    ///
    /// Returns `CookingError::StepOutOfRange` if `index` is not a valid step.
    pub fn toggle_step(&mut self, index: usize) -> Result<bool, CookingError> {
        let now_done = self.session.toggle_step(index)?;
        self.persist_percentage();
        Ok(now_done)
    }

    /// Uncheck every step and schedule a write of the resulting 0%.
    pub fn reset(&mut self) {
        self.session.reset();
        self.persist_percentage();
    }

    /// Handle of the most recently spawned write, for callers that want to
    /// await it (tests, shutdown paths).
    pub fn last_persist(&mut self) -> Option<JoinHandle<()>> {
        self.last_persist.take()
    }

    /// Stop future and in-flight writes without aborting the task.
    ///
    /// The spawned task re-checks the flag before writing, so a teardown that
    /// races a toggle still suppresses the write.
    pub fn teardown(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    fn persist_percentage(&mut self) {
        let Some(user_id) = self.auth.current_user_id() else {
            return;
        };

        let recipe_id = self.session.recipe_id();
        let percentage = self.session.percentage();
        let progress = Arc::clone(&self.progress);
        let alive = Arc::clone(&self.alive);

        self.last_persist = Some(tokio::spawn(async move {
            if !alive.load(Ordering::SeqCst) {
                return;
            }
            if let Err(err) = progress.record(user_id, recipe_id, percentage).await {
                warn!("failed to persist cooking progress for {recipe_id}: {err}");
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusantara_core::model::{Difficulty, Recipe, Region, UserId};
    use nusantara_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    use crate::auth::AuthUser;

    fn recipe() -> Recipe {
        Recipe::new(
            RecipeId::random(),
            "Pepes Ikan",
            "Ikan kukus berbumbu dalam daun pisang",
            Region::Jawa,
            Difficulty::Medium,
            45,
            4,
            None,
            vec!["Ikan kembung".into(), "Daun pisang".into()],
            vec!["Lumuri bumbu".into(), "Bungkus daun".into(), "Kukus".into(), "Bakar sebentar".into()],
            None,
            false,
            fixed_clock().now(),
        )
        .unwrap()
    }

    fn tracker_with(auth: AuthSession) -> (CookingTracker, Arc<ProgressService>, Recipe) {
        let repo = Arc::new(InMemoryRepository::new());
        let progress = Arc::new(ProgressService::new(fixed_clock(), repo));
        let recipe = recipe();
        let tracker = CookingTracker::new(&recipe, auth, Arc::clone(&progress));
        (tracker, progress, recipe)
    }

    #[tokio::test]
    async fn signed_in_toggle_persists_percentage() {
        let user = AuthUser::new(UserId::random(), "ayu@example.com", Some("Ayu".into()));
        let user_id = user.id;
        let (mut tracker, progress, recipe) = tracker_with(AuthSession::signed_in(user));

        tracker.toggle_step(0).unwrap();
        tracker.toggle_step(2).unwrap();
        if let Some(handle) = tracker.last_persist() {
            handle.await.unwrap();
        }

        let records = progress.list_for_user(user_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].recipe_id(), recipe.id());
        assert!((records[0].progress_percentage() - 50.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn signed_out_toggle_stays_local() {
        let (mut tracker, progress, _recipe) = tracker_with(AuthSession::new());

        tracker.toggle_step(0).unwrap();
        assert!(tracker.last_persist().is_none());
        assert_eq!(tracker.progress().completed_steps, 1);

        // Nothing landed in storage for any user.
        let records = progress.list_for_user(UserId::random()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn teardown_suppresses_pending_write() {
        let user = AuthUser::new(UserId::random(), "ayu@example.com", None);
        let user_id = user.id;
        let (mut tracker, progress, _recipe) = tracker_with(AuthSession::signed_in(user));

        tracker.toggle_step(0).unwrap();
        tracker.teardown();
        if let Some(handle) = tracker.last_persist() {
            handle.await.unwrap();
        }

        let records = progress.list_for_user(user_id).await.unwrap();
        assert!(records.is_empty());
    }
}
