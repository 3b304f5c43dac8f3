use std::sync::Arc;

use tracing::{debug, info};

use super::dashboard::{completion_percentage, next_steps};
use super::domain::{Milestone, MilestoneSignals, UserId};
use super::evaluator::ProgressEvaluator;
use super::repository::{
    MilestoneRepository, ProgressCheck, ProgressDashboard, RepositoryError, UserRepository,
};

/// Service composing the account store, milestone stores, and the evaluator.
pub struct ProgressService<U, M> {
    users: Arc<U>,
    milestones: Arc<M>,
    evaluator: ProgressEvaluator,
}

impl<U, M> ProgressService<U, M>
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    pub fn new(users: Arc<U>, milestones: Arc<M>) -> Self {
        Self {
            users,
            milestones,
            evaluator: ProgressEvaluator::new(),
        }
    }

    /// Current milestone signals for a user.
    pub fn signals(&self, user_id: &UserId) -> Result<MilestoneSignals, ProgressServiceError> {
        self.users
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(self.milestones.signals(user_id)?)
    }

    /// Re-evaluate the stored status and persist a forward move.
    pub fn check(&self, user_id: &UserId) -> Result<ProgressCheck, ProgressServiceError> {
        let account = self
            .users
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?;

        let current = account.progress_status;
        let signals = self.milestones.signals(user_id)?;
        let next = self.evaluator.next_status(current, &signals);

        if next == current {
            let waiting_on = current.gate().map_or("nothing", Milestone::label);
            debug!(user = %user_id, status = %current, waiting_on, "progress unchanged");
            return Ok(ProgressCheck {
                user_id: *user_id,
                previous_status: current,
                progress_status: current,
                advanced: false,
            });
        }

        let stored = self.users.advance_status(user_id, next)?;
        info!(user = %user_id, from = %current, to = %stored, "progress advanced");

        Ok(ProgressCheck {
            user_id: *user_id,
            previous_status: current,
            progress_status: stored,
            advanced: stored > current,
        })
    }

    /// Run a check and attach the dashboard mapping for the resulting status.
    pub fn dashboard(&self, user_id: &UserId) -> Result<ProgressDashboard, ProgressServiceError> {
        let check = self.check(user_id)?;
        let status = check.progress_status;
        Ok(ProgressDashboard {
            progress_status: status,
            status_label: status.label(),
            percentage: completion_percentage(status),
            next_steps: next_steps(status),
        })
    }
}

/// Error raised by the progress service.
#[derive(Debug, thiserror::Error)]
pub enum ProgressServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ProgressServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProgressServiceError::Repository(RepositoryError::NotFound))
    }
}
