//! Bearer authentication for the assessment API.
//!
//! ```text
//! Request → auth_middleware ─ token valid ─→ AuthenticatedUser in extensions
//!                           ─ no token ────→ passes through
//!                           ─ bad token ───→ 401 / 503
//! Handler → RequireAuth reads the user, or answers 401
//! ```
//!
//! Every failure renders the same `ErrorResponse` body as the assessment
//! endpoints, so clients parse one error shape.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::assessment::dto::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates a bearer token when one is present and stores the caller.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Bearer token accepted");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => AuthRejection::from(err).into_response(),
    }
}

fn bearer_token(request: &Request) -> Option<String> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

/// Extractor for endpoints that need an owner.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Missing)
    }
}

/// Why a request was not authenticated.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No bearer token reached the handler.
    Missing,
    /// The identity collaborator refused the token.
    Refused(AuthError),
}

impl From<AuthError> for AuthRejection {
    fn from(err: AuthError) -> Self {
        AuthRejection::Refused(err)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Missing => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AuthRejection::Refused(AuthError::InvalidToken) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid token".to_string(),
            ),
            AuthRejection::Refused(AuthError::TokenExpired) => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token expired".to_string(),
            ),
            AuthRejection::Refused(AuthError::ServiceUnavailable(cause)) => {
                tracing::error!(%cause, "Identity service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AUTH_UNAVAILABLE",
                    "Authentication service unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
