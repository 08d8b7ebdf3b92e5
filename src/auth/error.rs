// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Authentication errors.
//!
//! Every unauthorized response carries a `WWW-Authenticate: Bearer`
//! challenge header, telling the client that bearer-token auth is expected.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication failure, surfaced to the client with a challenge header.
///
/// Token decode failures are deliberately undifferentiated: expired,
/// tampered, and malformed tokens all present as [`InvalidToken`].
///
/// [`InvalidToken`]: AuthError::InvalidToken
#[derive(Debug)]
pub enum AuthError {
    /// No bearer credential in the `Authorization` header, or the token
    /// carried no subject claim.
    MissingCredentials,
    /// The token failed to decode: bad signature, malformed, or expired.
    InvalidToken,
    /// Login attempt for a username that is not registered.
    UnknownUsername,
    /// Login attempt with a password that does not verify.
    WrongPassword,
    /// The token is valid but the account it names no longer exists.
    UnknownAccount,
    /// Internal fault on the authentication path.
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Stable machine-readable discriminator for the response body.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::InvalidToken => "invalid_token",
            AuthError::UnknownUsername => "unknown_username",
            AuthError::WrongPassword => "wrong_password",
            AuthError::UnknownAccount => "unknown_account",
            AuthError::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials
            | AuthError::InvalidToken
            | AuthError::UnknownUsername
            | AuthError::WrongPassword
            | AuthError::UnknownAccount => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Login is required"),
            AuthError::InvalidToken => {
                write!(f, "Token is expired or invalid. Please log in again.")
            }
            AuthError::UnknownUsername => write!(f, "Username does not exist"),
            AuthError::WrongPassword => write!(f, "Password is incorrect"),
            AuthError::UnknownAccount => write!(f, "Account no longer exists"),
            AuthError::Internal(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
