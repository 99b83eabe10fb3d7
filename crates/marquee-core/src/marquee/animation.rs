//! Row-stepped scroll animation
//!
//! Replaces a nested fast timer: the driver owns at most one animation and
//! advances it once per host clock tick.

use super::timing::step_toward;

/// Outcome of advancing an animation by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// Scroll position to apply for this frame
    Moved(u32),
    /// The target was already reached on a previous frame
    Arrived,
}

/// Incremental scroll toward an absolute position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAnimation {
    target: u32,
    step: u32,
}

impl RowAnimation {
    pub fn new(target: u32, step: u32) -> Self {
        Self {
            target,
            step: step.max(1),
        }
    }

    pub fn advance(&self, current: u32) -> AnimationStep {
        if self.target > current {
            AnimationStep::Moved(step_toward(current, self.target, self.step))
        } else {
            AnimationStep::Arrived
        }
    }
}
