use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{
    CancellationView, CvUploadRequest, PersonalDiscoveryRequest, RegistrationRequest,
    RegistrationView, ScholarshipAssessmentRequest, SubscriptionRequest,
};
use super::service::{OnboardingError, OnboardingService};
use crate::auth::{AuthState, Principal};
use crate::workflows::progress::repository::{
    MilestoneRepository, RepositoryError, UserRepository,
};
use crate::workflows::progress::router::{MOBILE_PREFIX, WEB_PREFIX};

/// Router for sign-up and milestone capture, mounted under both client prefixes.
pub fn onboarding_router<U, M>(service: Arc<OnboardingService<U, M>>, auth: AuthState) -> Router
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let mut router = Router::new();
    for prefix in [WEB_PREFIX, MOBILE_PREFIX] {
        router = router
            .route(&format!("{prefix}/accounts"), post(register_handler::<U, M>))
            .route(
                &format!("{prefix}/me/subscription"),
                post(subscription_handler::<U, M>),
            )
            .route(
                &format!("{prefix}/me/subscription/cancel"),
                post(cancel_subscription_handler::<U, M>),
            )
            .route(
                &format!("{prefix}/me/personal-discovery"),
                post(personal_discovery_handler::<U, M>),
            )
            .route(&format!("{prefix}/me/cvs"), post(cv_handler::<U, M>))
            .route(
                &format!("{prefix}/me/scholarship-assessment"),
                post(assessment_handler::<U, M>),
            );
    }

    router.with_state(service).layer(Extension(auth))
}

pub(crate) async fn register_handler<U, M>(
    State(service): State<Arc<OnboardingService<U, M>>>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.register(request).map(|account| RegistrationView {
            user_id: account.id,
            progress_status: account.progress_status,
        }),
    )
}

pub(crate) async fn subscription_handler<U, M>(
    State(service): State<Arc<OnboardingService<U, M>>>,
    principal: Principal,
    payload: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.activate_subscription(&principal.user_id, request),
    )
}

pub(crate) async fn cancel_subscription_handler<U, M>(
    State(service): State<Arc<OnboardingService<U, M>>>,
    principal: Principal,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    respond(
        StatusCode::OK,
        service
            .cancel_subscription(&principal.user_id)
            .map(|cancelled| CancellationView { cancelled }),
    )
}

pub(crate) async fn personal_discovery_handler<U, M>(
    State(service): State<Arc<OnboardingService<U, M>>>,
    principal: Principal,
    payload: Result<Json<PersonalDiscoveryRequest>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.submit_personal_discovery(&principal.user_id, request),
    )
}

pub(crate) async fn cv_handler<U, M>(
    State(service): State<Arc<OnboardingService<U, M>>>,
    principal: Principal,
    payload: Result<Json<CvUploadRequest>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.upload_cv(&principal.user_id, request),
    )
}

pub(crate) async fn assessment_handler<U, M>(
    State(service): State<Arc<OnboardingService<U, M>>>,
    principal: Principal,
    payload: Result<Json<ScholarshipAssessmentRequest>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    respond(
        StatusCode::CREATED,
        service.submit_scholarship_assessment(&principal.user_id, request),
    )
}

/// Malformed bodies get the same JSON error shape as validation failures.
fn rejected(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), Json(payload)).into_response()
}

fn respond<T: Serialize>(success: StatusCode, result: Result<T, OnboardingError>) -> Response {
    match result {
        Ok(body) => (success, Json(body)).into_response(),
        Err(err) => {
            let status = match &err {
                OnboardingError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
                OnboardingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                OnboardingError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
                OnboardingError::Repository(RepositoryError::Unavailable(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}
