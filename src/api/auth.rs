// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Account endpoints: register, login, current user.

use axum::{extract::State, http::StatusCode, Form, Json};
use tokio::task;

use crate::auth::{self, Auth, AuthError, LOGIN_TOKEN_TTL};
use crate::error::ApiError;
use crate::models::{LoginForm, RegisterRequest, Role, TokenResponse, UserResponse};
use crate::state::AppState;

/// Minimum password length in characters.
const MIN_PASSWORD_CHARS: usize = 6;

/// Maximum password length in characters.
const MAX_PASSWORD_CHARS: usize = 50;

/// Register a new account.
///
/// The response is the public view of the account; the password hash is
/// never returned.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Password too short or too long"),
        (status = 409, description = "Username already taken"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }

    let password_chars = request.password.chars().count();
    if password_chars < MIN_PASSWORD_CHARS {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    if password_chars > MAX_PASSWORD_CHARS {
        return Err(ApiError::bad_request(
            "Password must be at most 50 characters",
        ));
    }

    // Cheap duplicate check before burning bcrypt time; uniqueness is
    // enforced again under the write lock at insert.
    if state
        .store
        .read()
        .await
        .user_by_username(&request.username)
        .is_some()
    {
        return Err(ApiError::conflict("Username is already taken"));
    }

    let password = request.password.clone();
    let password_hash = task::spawn_blocking(move || auth::password::hash_password(&password))
        .await
        .map_err(|_| ApiError::internal("hashing task failed"))?
        .map_err(|err| ApiError::internal(err.to_string()))?;

    let mut store = state.store.write().await;
    let user = store.create_user(&request.username, password_hash, Role::User)?;

    tracing::info!(username = %user.username, "account registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Log in with username and password (form-encoded) and receive a bearer
/// token valid for 30 minutes.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Access token", body = TokenResponse),
        (status = 401, description = "Unknown username or wrong password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AuthError> {
    let stored_hash = {
        let store = state.store.read().await;
        match store.user_by_username(&form.username) {
            Some(user) => user.password_hash.clone(),
            None => return Err(AuthError::UnknownUsername),
        }
    };

    let password = form.password.clone();
    let outcome = task::spawn_blocking(move || auth::verify_password(&password, &stored_hash))
        .await
        .map_err(|err| AuthError::Internal(err.to_string()))?;

    if !outcome.is_verified() {
        return Err(AuthError::WrongPassword);
    }

    let access_token = state
        .tokens
        .issue_for_subject(&form.username, Some(LOGIN_TOKEN_TTL))
        .map_err(|err| AuthError::Internal(err.to_string()))?;

    tracing::debug!(username = %form.username, "login succeeded");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Return the authenticated account's public view.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn me(Auth(user): Auth) -> Json<UserResponse> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn register_alice(state: &AppState) -> UserResponse {
        let (status, Json(user)) = register(
            State(state.clone()),
            Json(RegisterRequest {
                username: "alice".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .expect("registration succeeds");
        assert_eq!(status, StatusCode::CREATED);
        user
    }

    #[tokio::test]
    async fn register_returns_public_view_only() {
        let state = AppState::for_tests();
        let user = register_alice(&state).await;

        assert_eq!(user.username, "alice");
        assert!(!user.id.is_empty());

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn register_rejects_short_password_before_duplicate_check() {
        let state = AppState::for_tests();
        register_alice(&state).await;

        // Same username, but the length check fires first.
        let error = register(
            State(state.clone()),
            Json(RegisterRequest {
                username: "alice".to_string(),
                password: "x".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);

        // Valid password, duplicate username.
        let error = register(
            State(state),
            Json(RegisterRequest {
                username: "alice".to_string(),
                password: "another-secret".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_rejects_overlong_password() {
        let state = AppState::for_tests();
        let error = register(
            State(state),
            Json(RegisterRequest {
                username: "bob".to_string(),
                password: "p".repeat(51),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_from_wrong_password() {
        let state = AppState::for_tests();
        register_alice(&state).await;

        let result = login(
            State(state.clone()),
            Form(LoginForm {
                username: "nobody".to_string(),
                password: "whatever".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AuthError::UnknownUsername)));

        let result = login(
            State(state),
            Form(LoginForm {
                username: "alice".to_string(),
                password: "wrongpass".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AuthError::WrongPassword)));
    }

    #[tokio::test]
    async fn login_issues_a_verifiable_bearer_token() {
        let state = AppState::for_tests();
        register_alice(&state).await;

        let Json(token) = login(
            State(state.clone()),
            Form(LoginForm {
                username: "alice".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .expect("login succeeds");

        assert_eq!(token.token_type, "bearer");
        let claims = state.tokens.verify(&token.access_token).unwrap();
        assert_eq!(claims[crate::auth::SUBJECT_CLAIM], "alice");
    }
}
