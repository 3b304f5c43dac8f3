use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use serde_json::json;

use super::domain::UserId;
use super::repository::{MilestoneRepository, RepositoryError, UserRepository};
use super::service::{ProgressService, ProgressServiceError};
use crate::auth::{AuthState, Principal};

pub const WEB_PREFIX: &str = "/api/v1";
pub const MOBILE_PREFIX: &str = "/api/mobile/v1";

/// Router exposing the progress check to web and mobile clients.
pub fn progress_router<U, M>(service: Arc<ProgressService<U, M>>, auth: AuthState) -> Router
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    let mut router = Router::new();
    for prefix in [WEB_PREFIX, MOBILE_PREFIX] {
        router = router
            .route(
                &format!("{prefix}/progress/status"),
                get(status_handler::<U, M>),
            )
            .route(
                &format!("{prefix}/progress/dashboard"),
                get(dashboard_handler::<U, M>),
            );
    }

    router
        .route(
            "/api/v1/admin/users/:user_id/progress",
            get(admin_progress_handler::<U, M>),
        )
        .with_state(service)
        .layer(Extension(auth))
}

pub(crate) async fn status_handler<U, M>(
    State(service): State<Arc<ProgressService<U, M>>>,
    principal: Principal,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    match service.check(&principal.user_id) {
        Ok(check) => (StatusCode::OK, axum::Json(check.status_view())).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn dashboard_handler<U, M>(
    State(service): State<Arc<ProgressService<U, M>>>,
    principal: Principal,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    match service.dashboard(&principal.user_id) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn admin_progress_handler<U, M>(
    State(service): State<Arc<ProgressService<U, M>>>,
    principal: Principal,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    M: MilestoneRepository + 'static,
{
    if let Err(err) = principal.require_admin() {
        return err.into_response();
    }

    let Ok(user_id) = user_id.parse::<UserId>() else {
        let payload = json!({ "error": "user id must be a UUID" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match service.check(&user_id) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(err) => service_error_response(err),
    }
}

fn service_error_response(err: ProgressServiceError) -> Response {
    let (status, message) = match &err {
        ProgressServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "user not found".to_string())
        }
        ProgressServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        ProgressServiceError::Repository(RepositoryError::Unavailable(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    };
    (status, axum::Json(json!({ "error": message }))).into_response()
}
