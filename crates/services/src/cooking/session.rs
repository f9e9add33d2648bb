use std::collections::HashSet;

use nusantara_core::model::{Recipe, RecipeId};

use super::progress::CookingProgress;
use crate::error::CookingError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory step checklist for one recipe being cooked.
///
/// Tracks which steps the cook has ticked off and derives a completion
/// percentage from the count. Completed steps form a set, so ticking a step
/// twice returns it to unchecked.
#[derive(Debug, Clone)]
pub struct CookingSession {
    recipe_id: RecipeId,
    total_steps: usize,
    completed: HashSet<usize>,
}

impl CookingSession {
    #[must_use]
    pub fn new(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.id(),
            total_steps: recipe.step_count(),
            completed: HashSet::new(),
        }
    }

    #[must_use]
    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_step_done(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    /// Flip one step between done and not done.
    ///
    /// Returns the step's new done-ness.
    ///
    /// # Errors
    ///
    /// Returns `CookingError::StepOutOfRange` if `index` is not a valid step.
    pub fn toggle_step(&mut self, index: usize) -> Result<bool, CookingError> {
        if index >= self.total_steps {
            return Err(CookingError::StepOutOfRange {
                index,
                steps: self.total_steps,
            });
        }
        if self.completed.remove(&index) {
            Ok(false)
        } else {
            self.completed.insert(index);
            Ok(true)
        }
    }

    /// Completion percentage in `[0.0, 100.0]`.
    ///
    /// A recipe with no steps reports `0.0` rather than dividing by zero.
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total_steps == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed.len() as f32 / self.total_steps as f32;
        ratio * 100.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_steps > 0 && self.completed.len() == self.total_steps
    }

    /// Snapshot of the session for display.
    #[must_use]
    pub fn progress(&self) -> CookingProgress {
        CookingProgress {
            total_steps: self.total_steps,
            completed_steps: self.completed.len(),
            percentage: self.percentage(),
            is_complete: self.is_complete(),
        }
    }

    /// Uncheck every step.
    pub fn reset(&mut self) {
        self.completed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusantara_core::model::{Difficulty, Recipe, Region};
    use nusantara_core::time::fixed_now;

    fn recipe_with_steps(steps: &[&str]) -> Recipe {
        Recipe::new(
            RecipeId::random(),
            "Nasi Goreng Kampung",
            "Nasi goreng sederhana",
            Region::Jawa,
            Difficulty::Easy,
            20,
            2,
            None,
            vec!["Nasi putih".into(), "Bawang merah".into()],
            steps.iter().map(|s| (*s).to_string()).collect(),
            None,
            false,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn toggling_moves_percentage() {
        let recipe = recipe_with_steps(&["Tumis bumbu", "Masukkan nasi", "Aduk rata", "Sajikan"]);
        let mut session = CookingSession::new(&recipe);

        assert!(session.toggle_step(0).unwrap());
        assert!(session.toggle_step(2).unwrap());
        assert!((session.percentage() - 50.0).abs() < f32::EPSILON);
        assert!(!session.is_complete());

        assert!(session.toggle_step(1).unwrap());
        assert!(session.toggle_step(3).unwrap());
        assert!((session.percentage() - 100.0).abs() < f32::EPSILON);
        assert!(session.is_complete());
    }

    #[test]
    fn double_toggle_returns_to_unchecked() {
        let recipe = recipe_with_steps(&["Tumis bumbu", "Sajikan"]);
        let mut session = CookingSession::new(&recipe);

        assert!(session.toggle_step(0).unwrap());
        assert!(!session.toggle_step(0).unwrap());
        assert_eq!(session.completed_count(), 0);
        assert!((session.percentage() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        let recipe = recipe_with_steps(&["Tumis bumbu", "Sajikan"]);
        let mut session = CookingSession::new(&recipe);

        let err = session.toggle_step(2).unwrap_err();
        assert_eq!(err, CookingError::StepOutOfRange { index: 2, steps: 2 });
        assert_eq!(session.completed_count(), 0);
    }

    #[test]
    fn zero_step_recipe_reports_zero_percent() {
        let recipe = recipe_with_steps(&[]);
        let session = CookingSession::new(&recipe);

        assert_eq!(session.total_steps(), 0);
        assert!((session.percentage() - 0.0).abs() < f32::EPSILON);
        assert!(!session.is_complete());
    }

    #[test]
    fn reset_clears_all_steps() {
        let recipe = recipe_with_steps(&["Tumis bumbu", "Sajikan"]);
        let mut session = CookingSession::new(&recipe);

        session.toggle_step(0).unwrap();
        session.toggle_step(1).unwrap();
        session.reset();

        assert_eq!(session.completed_count(), 0);
        assert!(!session.is_step_done(0));
    }

    #[test]
    fn percentage_tracks_set_through_any_sequence() {
        let recipe = recipe_with_steps(&["Tumis bumbu", "Masukkan nasi", "Aduk rata", "Sajikan"]);
        let mut session = CookingSession::new(&recipe);

        for &index in &[0, 3, 0, 1, 2, 2, 3, 0] {
            session.toggle_step(index).unwrap();
            #[allow(clippy::cast_precision_loss)]
            let expected = session.completed_count() as f32 / 4.0 * 100.0;
            assert!((session.percentage() - expected).abs() < f32::EPSILON);
            assert!((0.0..=100.0).contains(&session.percentage()));
        }
    }

    #[test]
    fn progress_snapshot_matches_state() {
        let recipe = recipe_with_steps(&["Tumis bumbu", "Masukkan nasi", "Sajikan"]);
        let mut session = CookingSession::new(&recipe);
        session.toggle_step(1).unwrap();

        let progress = session.progress();
        assert_eq!(progress.total_steps, 3);
        assert_eq!(progress.completed_steps, 1);
        assert!(!progress.is_complete);
    }
}
