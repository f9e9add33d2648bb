use serde::Serialize;

/// Aggregated view of cooking progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CookingProgress {
    pub total_steps: usize,
    pub completed_steps: usize,
    pub percentage: f32,
    pub is_complete: bool,
}
