// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Optional AI recommendation capability.
//!
//! Whether the generative-model backend is usable is decided once at
//! startup from configuration, not probed per call: the state holds either
//! a [`Configured`] client or [`Unavailable`].
//!
//! [`Configured`]: RecommendationClient::Configured
//! [`Unavailable`]: RecommendationClient::Unavailable

use axum::http::StatusCode;
use serde_json::json;

use crate::config::AppConfig;
use crate::error::ApiError;

const GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Injected capability for restaurant recommendations.
pub enum RecommendationClient {
    /// API key present; requests are forwarded to the model.
    Configured {
        http: reqwest::Client,
        api_key: String,
    },
    /// No API key configured; the endpoint reports 503.
    Unavailable,
}

impl RecommendationClient {
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.gemini_api_key {
            Some(api_key) => Self::Configured {
                http: reqwest::Client::new(),
                api_key: api_key.clone(),
            },
            None => Self::Unavailable,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }

    /// Forward a user message to the model and return its reply text.
    pub async fn recommend(&self, message: &str) -> Result<String, ApiError> {
        let (http, api_key) = match self {
            Self::Configured { http, api_key } => (http, api_key),
            Self::Unavailable => {
                return Err(ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AI recommendation is not configured",
                ))
            }
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": message }] }]
        });

        let response = http
            .post(GENERATE_URL)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "recommendation backend unreachable");
                ApiError::new(StatusCode::BAD_GATEWAY, "AI backend is unreachable")
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "recommendation backend error");
            return Err(ApiError::new(
                StatusCode::BAD_GATEWAY,
                "AI backend returned an error",
            ));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|_| ApiError::new(StatusCode::BAD_GATEWAY, "AI backend reply was unreadable"))?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.to_string())
            .ok_or_else(|| ApiError::new(StatusCode::BAD_GATEWAY, "AI backend reply was empty"))
    }
}
