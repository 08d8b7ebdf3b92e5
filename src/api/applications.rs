// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Business-registration application endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{Application, CreateApplicationRequest};
use crate::state::AppState;

/// Submit a business-registration application. Applications start `pending`.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationRequest,
    tag = "Applications",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Application),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn create_application(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    for (field, value) in [
        ("name", &request.name),
        ("company_name", &request.company_name),
        ("tax_id", &request.tax_id),
        ("phone_number", &request.phone_number),
        ("email", &request.email),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::bad_request(format!("{field} is required")));
        }
    }

    let mut store = state.store.write().await;
    let application = store.create_application(&user.id, request);
    Ok((StatusCode::CREATED, Json(application)))
}

/// List the authenticated account's own applications, newest first.
#[utoipa::path(
    get,
    path = "/api/applications/me",
    tag = "Applications",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Application]),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn list_my_applications(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Json<Vec<Application>> {
    let store = state.store.read().await;
    Json(store.applications_for_user(&user.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationStatus, Role};

    fn request() -> CreateApplicationRequest {
        CreateApplicationRequest {
            name: "Alice".to_string(),
            company_name: "Alice's Cafe".to_string(),
            tax_id: "123-45-67890".to_string(),
            phone_number: "010-0000-0000".to_string(),
            email: "alice@example.com".to_string(),
            title: Some("New cafe near the north gate".to_string()),
            details: None,
        }
    }

    #[tokio::test]
    async fn submitted_application_is_pending_and_owned() {
        let state = AppState::for_tests();
        let user = state
            .store
            .write()
            .await
            .create_user("alice", "$2b$12$hash".to_string(), Role::User)
            .unwrap();

        let (status, Json(application)) = create_application(
            State(state.clone()),
            Auth(user.clone()),
            Json(request()),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.user_id, user.id);

        let Json(mine) = list_my_applications(State(state), Auth(user)).await;
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn blank_required_field_is_rejected() {
        let state = AppState::for_tests();
        let user = state
            .store
            .write()
            .await
            .create_user("alice", "$2b$12$hash".to_string(), Role::User)
            .unwrap();

        let mut bad = request();
        bad.tax_id = "  ".to_string();
        let error = create_application(State(state), Auth(user), Json(bad))
            .await
            .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }
}
