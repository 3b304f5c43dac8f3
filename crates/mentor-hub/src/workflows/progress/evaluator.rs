use super::domain::{MilestoneSignals, ProgressStatus};

/// Stateless single-step transition over the progress sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressEvaluator;

impl ProgressEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Returns the status that follows `current` given the milestone signals.
    ///
    /// Advances at most one step per call and never moves backwards. A status
    /// without a gate milestone is returned unchanged.
    pub fn next_status(&self, current: ProgressStatus, signals: &MilestoneSignals) -> ProgressStatus {
        match (current.gate(), current.successor()) {
            (Some(milestone), Some(next)) if signals.is_met(milestone) => next,
            _ => current,
        }
    }
}
