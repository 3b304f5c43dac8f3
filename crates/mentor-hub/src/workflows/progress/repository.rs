use serde::Serialize;

use super::dashboard::NextStep;
use super::domain::{
    CvDocument, MilestoneSignals, PersonalDiscovery, ProgressStatus, ScholarshipAssessment,
    Subscription, UserAccount, UserId,
};

/// Account storage used by registration and the progress check.
pub trait UserRepository: Send + Sync {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;

    /// Moves the stored status forward to `status` and returns what is stored afterwards.
    ///
    /// Implementations keep the greater of the stored and requested status in a single
    /// write so concurrent checks converge.
    fn advance_status(
        &self,
        id: &UserId,
        status: ProgressStatus,
    ) -> Result<ProgressStatus, RepositoryError>;
}

/// Milestone record storage. The progress check only uses the `has_*` queries.
pub trait MilestoneRepository: Send + Sync {
    fn has_active_subscription(&self, user: &UserId) -> Result<bool, RepositoryError>;
    fn has_personal_discovery(&self, user: &UserId) -> Result<bool, RepositoryError>;
    fn has_uploaded_cv(&self, user: &UserId) -> Result<bool, RepositoryError>;
    fn has_scholarship_assessment(&self, user: &UserId) -> Result<bool, RepositoryError>;

    fn insert_subscription(&self, subscription: Subscription)
        -> Result<Subscription, RepositoryError>;
    /// Cancels every active subscription of `user`, returning how many changed.
    fn cancel_subscriptions(&self, user: &UserId) -> Result<usize, RepositoryError>;
    fn insert_personal_discovery(
        &self,
        discovery: PersonalDiscovery,
    ) -> Result<PersonalDiscovery, RepositoryError>;
    fn insert_cv(&self, cv: CvDocument) -> Result<CvDocument, RepositoryError>;
    fn insert_scholarship_assessment(
        &self,
        assessment: ScholarshipAssessment,
    ) -> Result<ScholarshipAssessment, RepositoryError>;

    fn signals(&self, user: &UserId) -> Result<MilestoneSignals, RepositoryError> {
        Ok(MilestoneSignals {
            has_active_subscription: self.has_active_subscription(user)?,
            has_personal_discovery: self.has_personal_discovery(user)?,
            has_uploaded_cv: self.has_uploaded_cv(user)?,
            has_scholarship_assessment: self.has_scholarship_assessment(user)?,
        })
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Result of a single progress check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressCheck {
    pub user_id: UserId,
    pub previous_status: ProgressStatus,
    pub progress_status: ProgressStatus,
    pub advanced: bool,
}

/// Body of the status-check endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStatusView {
    pub progress_status: ProgressStatus,
}

/// Body of the dashboard endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDashboard {
    pub progress_status: ProgressStatus,
    pub status_label: &'static str,
    pub percentage: u8,
    pub next_steps: Vec<NextStep>,
}

impl ProgressCheck {
    pub fn status_view(&self) -> ProgressStatusView {
        ProgressStatusView {
            progress_status: self.progress_status,
        }
    }
}
