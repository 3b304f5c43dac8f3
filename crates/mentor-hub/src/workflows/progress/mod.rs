//! Onboarding progress: the status sequence, its single-step evaluator, and the
//! check that persists forward moves.

pub mod dashboard;
pub mod domain;
mod evaluator;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;


pub use dashboard::{completion_percentage, next_steps, NextStep, StepState};
pub use domain::{
    CvDocument, Milestone, MilestoneSignals, PersonalDiscovery, ProgressStatus,
    ScholarshipAssessment, Subscription, SubscriptionStatus, UserAccount, UserId,
};
pub use evaluator::ProgressEvaluator;
pub use memory::{InMemoryMilestoneRepository, InMemoryUserRepository};
pub use repository::{
    MilestoneRepository, ProgressCheck, ProgressDashboard, ProgressStatusView, RepositoryError,
    UserRepository,
};
pub use router::progress_router;
pub use service::{ProgressService, ProgressServiceError};
