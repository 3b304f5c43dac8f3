use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::domain::{
    CvUploadRequest, PersonalDiscoveryRequest, RegistrationRequest, ScholarshipAssessmentRequest,
    SubscriptionRequest,
};
use super::intake::{self, IntakeViolation};
use crate::workflows::progress::domain::{
    CvDocument, PersonalDiscovery, ScholarshipAssessment, Subscription, SubscriptionStatus,
    UserAccount, UserId,
};
use crate::workflows::progress::repository::{
    MilestoneRepository, RepositoryError, UserRepository,
};

/// Write side of onboarding: creates accounts and the milestone records the
/// progress check reads. Recording a milestone never re-evaluates progress.
pub struct OnboardingService<U, M> {
    users: Arc<U>,
    milestones: Arc<M>,
}

impl<U, M> OnboardingService<U, M>
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    pub fn new(users: Arc<U>, milestones: Arc<M>) -> Self {
        Self { users, milestones }
    }

    /// Create an account at the first progress status.
    pub fn register(&self, request: RegistrationRequest) -> Result<UserAccount, OnboardingError> {
        let (email, full_name) = intake::check_registration(&request)?;
        if self.users.find_by_email(&email)?.is_some() {
            return Err(RepositoryError::Conflict.into());
        }

        let account = self.users.insert(UserAccount::new(email, full_name))?;
        info!(user = %account.id, "account registered");
        Ok(account)
    }

    pub fn activate_subscription(
        &self,
        user_id: &UserId,
        request: SubscriptionRequest,
    ) -> Result<Subscription, OnboardingError> {
        let plan_id = intake::check_plan(&request.plan_id)?;
        self.ensure_user(user_id)?;

        let subscription = self.milestones.insert_subscription(Subscription {
            id: Uuid::new_v4(),
            user_id: *user_id,
            plan_id,
            status: SubscriptionStatus::Active,
            started_at: Utc::now(),
        })?;
        info!(user = %user_id, plan = %subscription.plan_id, "subscription activated");
        Ok(subscription)
    }

    /// Cancel every active subscription. Progress already earned is kept.
    pub fn cancel_subscription(&self, user_id: &UserId) -> Result<usize, OnboardingError> {
        self.ensure_user(user_id)?;
        let cancelled = self.milestones.cancel_subscriptions(user_id)?;
        if cancelled == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        info!(user = %user_id, cancelled, "subscriptions cancelled");
        Ok(cancelled)
    }

    pub fn submit_personal_discovery(
        &self,
        user_id: &UserId,
        request: PersonalDiscoveryRequest,
    ) -> Result<PersonalDiscovery, OnboardingError> {
        let answers = intake::check_discovery(request)?;
        self.ensure_user(user_id)?;

        let discovery = self.milestones.insert_personal_discovery(PersonalDiscovery {
            user_id: *user_id,
            answers,
            submitted_at: Utc::now(),
        })?;
        info!(user = %user_id, "personal discovery recorded");
        Ok(discovery)
    }

    pub fn upload_cv(
        &self,
        user_id: &UserId,
        request: CvUploadRequest,
    ) -> Result<CvDocument, OnboardingError> {
        let request = intake::check_cv(request)?;
        self.ensure_user(user_id)?;

        let cv = self.milestones.insert_cv(CvDocument {
            id: Uuid::new_v4(),
            user_id: *user_id,
            file_name: request.file_name,
            content_type: request.content_type,
            storage_key: request.storage_key,
            uploaded_at: Utc::now(),
        })?;
        info!(user = %user_id, cv = %cv.id, "cv metadata stored");
        Ok(cv)
    }

    pub fn submit_scholarship_assessment(
        &self,
        user_id: &UserId,
        request: ScholarshipAssessmentRequest,
    ) -> Result<ScholarshipAssessment, OnboardingError> {
        let scores = intake::check_assessment(request)?;
        self.ensure_user(user_id)?;

        let assessment = self
            .milestones
            .insert_scholarship_assessment(ScholarshipAssessment {
                user_id: *user_id,
                scores,
                submitted_at: Utc::now(),
            })?;
        info!(user = %user_id, "scholarship assessment recorded");
        Ok(assessment)
    }

    fn ensure_user(&self, user_id: &UserId) -> Result<UserAccount, OnboardingError> {
        Ok(self
            .users
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
