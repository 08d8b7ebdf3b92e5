// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Axum extractors resolving the request's bearer credential to an account.
//!
//! Two entry points share one decode-and-lookup pipeline:
//!
//! - [`Auth`] fails the request with a 401 challenge when resolution fails.
//! - [`OptionalAuth`] swallows every failure and yields `None`, for
//!   endpoints that render differently for anonymous and authenticated
//!   viewers but must never block anonymous access.
//!
//! ```rust,ignore
//! async fn private_handler(Auth(user): Auth) -> impl IntoResponse { ... }
//! async fn public_handler(OptionalAuth(viewer): OptionalAuth) -> impl IntoResponse { ... }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde_json::Value;

use super::{token::SUBJECT_CLAIM, AuthError};
use crate::models::User;
use crate::state::AppState;

/// Required resolution: rejects the request when no valid identity resolves.
pub struct Auth(pub User);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = resolve_user(token, state).await?;
        Ok(Auth(user))
    }
}

/// Optional resolution: yields `None` instead of rejecting.
///
/// Absent, expired, malformed, and tampered credentials, as well as lookup
/// misses, all resolve to `None`.
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::MissingCredentials)?;

    header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)
}

/// Shared pipeline: verify the token, extract the subject, look the account
/// up by username.
async fn resolve_user(token: &str, state: &AppState) -> Result<User, AuthError> {
    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| AuthError::InvalidToken)?;

    let username = claims
        .get(SUBJECT_CLAIM)
        .and_then(Value::as_str)
        .ok_or(AuthError::MissingCredentials)?;

    // A token can outlive its account; surface that as its own failure so
    // the client sees "account no longer exists" rather than a token error.
    let store = state.store.read().await;
    store
        .user_by_username(username)
        .cloned()
        .ok_or(AuthError::UnknownAccount)
}
