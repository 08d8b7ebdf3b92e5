// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup into an
//! [`AppConfig`] that is passed by reference to the components that need it.
//! There is no global configuration state.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SECRET_KEY` | HMAC secret for signing access tokens | **Required** |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `GEMINI_API_KEY` | API key for the AI recommendation client | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! `SECRET_KEY` has no fallback on purpose: the server refuses to start
//! without it rather than signing tokens with a shipped default.

use std::env;

use thiserror::Error;

/// Environment variable name for the token signing secret.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the AI recommendation API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Configuration errors reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token signing secret is missing or blank.
    #[error("SECRET_KEY must be set to a non-empty value (no default secret is shipped)")]
    MissingSecret,
    /// The bind port could not be parsed.
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local development.
    Pretty,
    /// Structured JSON output for log aggregation.
    Json,
}

/// Process-wide configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// HMAC secret for the token codec. Mandatory.
    pub secret_key: String,
    /// API key for the AI recommendation client, if configured.
    pub gemini_api_key: Option<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key = lookup(SECRET_KEY_ENV)
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let host = lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };

        let gemini_api_key = lookup(GEMINI_API_KEY_ENV).filter(|key| !key.trim().is_empty());

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host,
            port,
            secret_key,
            gemini_api_key,
            log_format,
        })
    }
}
