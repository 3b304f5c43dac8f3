use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Request};
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::{AuthState, Role};
use crate::config::AuthConfig;
use crate::workflows::progress::domain::{
    CvDocument, PersonalDiscovery, ProgressStatus, ScholarshipAssessment, Subscription,
    SubscriptionStatus, UserAccount, UserId,
};
use crate::workflows::progress::repository::{
    MilestoneRepository, RepositoryError, UserRepository,
};
use crate::workflows::progress::{
    InMemoryMilestoneRepository, InMemoryUserRepository, ProgressService,
};

pub(crate) type MemoryProgressService =
    ProgressService<InMemoryUserRepository, InMemoryMilestoneRepository>;

pub(crate) fn auth_state() -> AuthState {
    AuthState::new(&AuthConfig {
        jwt_secret: "test-signing-secret".to_string(),
        token_ttl_minutes: 60,
        session_cookie: "mentor_session".to_string(),
    })
}

pub(crate) fn bearer(auth: &AuthState, user: &UserId, role: Role) -> HeaderValue {
    let token = auth.issue_token(user, role, None).expect("token issued");
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header")
}

pub(crate) fn get_request(uri: &str, authorization: Option<HeaderValue>) -> Request<axum::body::Body> {
    let mut builder = Request::get(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(axum::body::Body::empty()).expect("request builds")
}

pub(crate) fn post_json(
    uri: &str,
    authorization: Option<HeaderValue>,
    body: &Value,
) -> Request<axum::body::Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("json encodes"),
        ))
        .expect("request builds")
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(crate) fn stores() -> (Arc<InMemoryUserRepository>, Arc<InMemoryMilestoneRepository>) {
    (
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryMilestoneRepository::default()),
    )
}

pub(crate) fn build_progress() -> (
    MemoryProgressService,
    Arc<InMemoryUserRepository>,
    Arc<InMemoryMilestoneRepository>,
) {
    let (users, milestones) = stores();
    let service = ProgressService::new(users.clone(), milestones.clone());
    (service, users, milestones)
}

pub(crate) fn account_at(users: &InMemoryUserRepository, status: ProgressStatus) -> UserAccount {
    let mut account = UserAccount::new(format!("{}@example.com", Uuid::new_v4()), "Test User");
    account.progress_status = status;
    users.insert(account).expect("account inserted")
}

pub(crate) fn grant_subscription(milestones: &InMemoryMilestoneRepository, user: &UserId) {
    milestones
        .insert_subscription(Subscription {
            id: Uuid::new_v4(),
            user_id: *user,
            plan_id: "premium".to_string(),
            status: SubscriptionStatus::Active,
            started_at: Utc::now(),
        })
        .expect("subscription stored");
}

pub(crate) fn grant_discovery(milestones: &InMemoryMilestoneRepository, user: &UserId) {
    let mut answers = BTreeMap::new();
    answers.insert("goal".to_string(), "Graduate school abroad".to_string());
    milestones
        .insert_personal_discovery(PersonalDiscovery {
            user_id: *user,
            answers,
            submitted_at: Utc::now(),
        })
        .expect("discovery stored");
}

pub(crate) fn grant_cv(milestones: &InMemoryMilestoneRepository, user: &UserId) {
    milestones
        .insert_cv(CvDocument {
            id: Uuid::new_v4(),
            user_id: *user,
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            storage_key: format!("cvs/{user}/cv.pdf"),
            uploaded_at: Utc::now(),
        })
        .expect("cv stored");
}

pub(crate) fn grant_assessment(milestones: &InMemoryMilestoneRepository, user: &UserId) {
    let mut scores = BTreeMap::new();
    scores.insert("academics".to_string(), 80);
    milestones
        .insert_scholarship_assessment(ScholarshipAssessment {
            user_id: *user,
            scores,
            submitted_at: Utc::now(),
        })
        .expect("assessment stored");
}

pub(crate) fn grant_all(milestones: &InMemoryMilestoneRepository, user: &UserId) {
    grant_subscription(milestones, user);
    grant_discovery(milestones, user);
    grant_cv(milestones, user);
    grant_assessment(milestones, user);
}

/// User store whose backend is always down.
pub(crate) struct UnavailableUsers;

impl UserRepository for UnavailableUsers {
    fn insert(&self, _account: UserAccount) -> Result<UserAccount, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn advance_status(
        &self,
        _id: &UserId,
        _status: ProgressStatus,
    ) -> Result<ProgressStatus, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(crate) fn stored_status(users: &InMemoryUserRepository, id: &UserId) -> ProgressStatus {
    users
        .fetch(id)
        .expect("fetch succeeds")
        .expect("account present")
        .progress_status
}
