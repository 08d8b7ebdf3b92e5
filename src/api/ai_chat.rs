// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! AI restaurant-recommendation endpoint.

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// Ask the recommendation model about nearby restaurants.
///
/// Returns 503 when no API key was configured at startup.
#[utoipa::path(
    post,
    path = "/api/ai-chat",
    request_body = ChatRequest,
    tag = "AI",
    responses(
        (status = 200, body = ChatResponse),
        (status = 400, description = "Blank message"),
        (status = 503, description = "AI recommendation not configured"),
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let response = state.ai.recommend(&request.message).await?;
    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let state = AppState::for_tests();
        let error = chat(
            State(state),
            Json(ChatRequest {
                message: "  ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unconfigured_client_reports_503() {
        let state = AppState::for_tests();
        let error = chat(
            State(state),
            Json(ChatRequest {
                message: "quiet lunch spot?".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
