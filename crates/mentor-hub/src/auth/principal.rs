use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;

use super::{AuthError, Claims, Role};
use crate::config::AuthConfig;
use crate::workflows::progress::domain::UserId;

/// Extract a Bearer token from an Authorization header value.
fn bearer_token_from_header(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::InvalidAuthHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = parts.next().ok_or(AuthError::InvalidAuthHeader)?;
    if parts.next().is_some() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

fn token_from_cookie_header<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == cookie_name && !value.trim().is_empty() {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Token keys and settings shared by every authenticated route.
#[derive(Clone)]
pub struct AuthState {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    session_cookie: String,
}

impl AuthState {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            inner: Arc::new(AuthInner {
                encoding_key: EncodingKey::from_secret(secret),
                decoding_key: DecodingKey::from_secret(secret),
                token_ttl: Duration::minutes(config.token_ttl_minutes),
                session_cookie: config.session_cookie.clone(),
            }),
        }
    }

    pub fn session_cookie(&self) -> &str {
        &self.inner.session_cookie
    }

    /// Mint a signed token for `user_id`.
    pub fn issue_token(
        &self,
        user_id: &UserId,
        role: Role,
        email: Option<&str>,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.inner.token_ttl).timestamp(),
            iat: Some(now.timestamp()),
            role,
            email: email.map(str::to_string),
        };
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.inner.encoding_key)
            .map_err(|err| AuthError::Encoding(err.to_string()))
    }

    /// Validate signature and expiry.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.inner.decoding_key, &validation).map_err(|err| {
            warn!("token validation failed: {:?}", err.kind());
            match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(err.to_string()),
            }
        })?;
        Ok(data.claims)
    }

    /// Resolve the caller from request headers. The bearer header wins over the cookie.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let token = if let Some(value) = headers.get(AUTHORIZATION) {
            let value = value.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
            bearer_token_from_header(value)?
        } else {
            headers
                .get_all(COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .find_map(|value| token_from_cookie_header(value, self.session_cookie()))
                .ok_or(AuthError::MissingCredentials)?
        };

        let claims = self.validate_token(token)?;
        Principal::from_claims(claims)
    }
}

/// Authenticated caller, scoped to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            email: None,
        }
    }

    pub fn from_claims(claims: Claims) -> Result<Self, AuthError> {
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidSubject)?;
        Ok(Self {
            user_id,
            role: claims.role,
            email: claims.email,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Reads the [`AuthState`] installed as a request extension and validates the caller.
#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<AuthState>()
            .cloned()
            .ok_or(AuthError::NotConfigured)?;
        auth.authenticate(&parts.headers)
    }
}
