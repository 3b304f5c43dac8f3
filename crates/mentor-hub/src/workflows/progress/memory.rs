//! Process-local stores backing the service until a relational adapter is wired in.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    CvDocument, PersonalDiscovery, ProgressStatus, ScholarshipAssessment, Subscription,
    SubscriptionStatus, UserAccount, UserId,
};
use super::repository::{MilestoneRepository, RepositoryError, UserRepository};

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{store} lock poisoned")))
}

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    accounts: Arc<Mutex<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserRepository {
    /// Drop an account, as an admin deletion would.
    pub fn remove(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(lock(&self.accounts, "user store")?.remove(id))
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = lock(&self.accounts, "user store")?;
        let email_taken = guard
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&account.email));
        if email_taken || guard.contains_key(&account.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id, account.clone());
        Ok(account)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(lock(&self.accounts, "user store")?.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(lock(&self.accounts, "user store")?
            .values()
            .find(|account| account.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn advance_status(
        &self,
        id: &UserId,
        status: ProgressStatus,
    ) -> Result<ProgressStatus, RepositoryError> {
        let mut guard = lock(&self.accounts, "user store")?;
        let account = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if status > account.progress_status {
            account.progress_status = status;
        }
        Ok(account.progress_status)
    }
}

#[derive(Default)]
struct MilestoneTables {
    subscriptions: Vec<Subscription>,
    discoveries: HashMap<UserId, PersonalDiscovery>,
    cvs: Vec<CvDocument>,
    assessments: HashMap<UserId, ScholarshipAssessment>,
}

#[derive(Default, Clone)]
pub struct InMemoryMilestoneRepository {
    tables: Arc<Mutex<MilestoneTables>>,
}

impl InMemoryMilestoneRepository {
    pub fn subscriptions_for(&self, user: &UserId) -> Result<Vec<Subscription>, RepositoryError> {
        Ok(lock(&self.tables, "milestone store")?
            .subscriptions
            .iter()
            .filter(|subscription| subscription.user_id == *user)
            .cloned()
            .collect())
    }

    pub fn cvs_for(&self, user: &UserId) -> Result<Vec<CvDocument>, RepositoryError> {
        Ok(lock(&self.tables, "milestone store")?
            .cvs
            .iter()
            .filter(|cv| cv.user_id == *user)
            .cloned()
            .collect())
    }
}

impl MilestoneRepository for InMemoryMilestoneRepository {
    fn has_active_subscription(&self, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(lock(&self.tables, "milestone store")?
            .subscriptions
            .iter()
            .any(|subscription| subscription.user_id == *user && subscription.is_active()))
    }

    fn has_personal_discovery(&self, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(lock(&self.tables, "milestone store")?
            .discoveries
            .contains_key(user))
    }

    fn has_uploaded_cv(&self, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(lock(&self.tables, "milestone store")?
            .cvs
            .iter()
            .any(|cv| cv.user_id == *user))
    }

    fn has_scholarship_assessment(&self, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(lock(&self.tables, "milestone store")?
            .assessments
            .contains_key(user))
    }

    fn insert_subscription(
        &self,
        subscription: Subscription,
    ) -> Result<Subscription, RepositoryError> {
        let mut guard = lock(&self.tables, "milestone store")?;
        if guard
            .subscriptions
            .iter()
            .any(|existing| existing.id == subscription.id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    fn cancel_subscriptions(&self, user: &UserId) -> Result<usize, RepositoryError> {
        let mut guard = lock(&self.tables, "milestone store")?;
        let mut cancelled = 0;
        for subscription in guard
            .subscriptions
            .iter_mut()
            .filter(|subscription| subscription.user_id == *user && subscription.is_active())
        {
            subscription.status = SubscriptionStatus::Cancelled;
            cancelled += 1;
        }
        Ok(cancelled)
    }

    fn insert_personal_discovery(
        &self,
        discovery: PersonalDiscovery,
    ) -> Result<PersonalDiscovery, RepositoryError> {
        let mut guard = lock(&self.tables, "milestone store")?;
        if guard.discoveries.contains_key(&discovery.user_id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .discoveries
            .insert(discovery.user_id, discovery.clone());
        Ok(discovery)
    }

    fn insert_cv(&self, cv: CvDocument) -> Result<CvDocument, RepositoryError> {
        let mut guard = lock(&self.tables, "milestone store")?;
        if guard.cvs.iter().any(|existing| existing.id == cv.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.cvs.push(cv.clone());
        Ok(cv)
    }

    fn insert_scholarship_assessment(
        &self,
        assessment: ScholarshipAssessment,
    ) -> Result<ScholarshipAssessment, RepositoryError> {
        let mut guard = lock(&self.tables, "milestone store")?;
        if guard.assessments.contains_key(&assessment.user_id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .assessments
            .insert(assessment.user_id, assessment.clone());
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_status_keeps_the_furthest_status() {
        let users = InMemoryUserRepository::default();
        let account = users
            .insert(UserAccount::new("ada@example.com", "Ada"))
            .expect("insert succeeds");

        let stored = users
            .advance_status(&account.id, ProgressStatus::CvAlignmentPending)
            .expect("advance succeeds");
        assert_eq!(stored, ProgressStatus::CvAlignmentPending);

        let stored = users
            .advance_status(&account.id, ProgressStatus::PersonalDiscoveryPending)
            .expect("stale write accepted");
        assert_eq!(stored, ProgressStatus::CvAlignmentPending);
    }

    #[test]
    fn advance_status_for_unknown_user_is_not_found() {
        let users = InMemoryUserRepository::default();
        assert!(matches!(
            users.advance_status(&UserId::new(), ProgressStatus::Completed),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn email_uniqueness_ignores_case() {
        let users = InMemoryUserRepository::default();
        users
            .insert(UserAccount::new("ada@example.com", "Ada"))
            .expect("first insert");
        assert!(matches!(
            users.insert(UserAccount::new("ADA@example.com", "Ada Again")),
            Err(RepositoryError::Conflict)
        ));
        assert!(users
            .find_by_email("Ada@Example.com")
            .expect("lookup succeeds")
            .is_some());
    }
}
