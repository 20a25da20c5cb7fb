use crate::error::{AppError, Result};
use crate::model::{LoginRequest, UserResponse, VerifyTokenRequest, STATUS_SUCCESS};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use mapsync_core::{AuthError, Subject};
use tracing::{debug, warn};

// Placeholder credentials for local demos. Not an authentication mechanism;
// real sign-in goes through the identity provider and `/auth/verify-token`.
const DEMO_EMAIL: &str = "test@example.com";
const DEMO_PASSWORD: &str = "1234";
const DEMO_USER_ID: &str = "demo-user";

pub async fn login_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    if !state.demo_login() {
        return Err(AppError::NotFound("demo login is disabled".to_string()));
    }

    let Json(request) = request?;
    let valid = request.email.as_deref() == Some(DEMO_EMAIL)
        && request.password.as_deref() == Some(DEMO_PASSWORD);
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(Json(UserResponse {
        status: STATUS_SUCCESS,
        user_id: DEMO_USER_ID.to_string(),
    }))
}

pub async fn verify_token_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<VerifyTokenRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(request) = request?;
    let token = request
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("missing required fields: token".to_string()))?;

    let subject = state.identity().verify(&token).await?;
    debug!(user = %subject, "token verified");

    Ok(Json(UserResponse {
        status: STATUS_SUCCESS,
        user_id: subject.user_id().to_string(),
    }))
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verifies the caller's bearer token, if one was sent.
///
/// Without an identity provider the caller is treated as anonymous; a token
/// the provider rejects is still an error.
pub(crate) async fn optional_caller(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Subject>> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    match state.identity().verify(token).await {
        Ok(subject) => Ok(Some(subject)),
        Err(AuthError::Unavailable(reason)) => {
            warn!(%reason, "identity provider unavailable, treating caller as anonymous");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Verifies the caller's bearer token, rejecting requests without one.
pub(crate) async fn required_caller(state: &AppState, headers: &HeaderMap) -> Result<Subject> {
    let token = bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;
    Ok(state.identity().verify(token).await?)
}
