// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// One variant per pipeline stage, so the webhook dispatcher can decide the
/// externally visible status per kind instead of relying on fallthrough.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required configuration: {0}")]
    Configuration(&'static str),

    #[error("Token acquisition failed: {0}")]
    Authentication(String),

    #[error("Strava API error: {0}")]
    UpstreamFetch(String),

    #[error("FHIR repository error: {0}")]
    Delivery(String),

    #[error("Unsupported webhook event: {0}")]
    UnsupportedEvent(String),

    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Configuration(key) => {
                tracing::error!(key = %key, "Missing required configuration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    Some(key.to_string()),
                )
            }
            AppError::Authentication(msg) => (
                StatusCode::BAD_GATEWAY,
                "authentication_error",
                Some(msg.clone()),
            ),
            AppError::UpstreamFetch(msg) => {
                (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone()))
            }
            AppError::Delivery(msg) => (StatusCode::BAD_GATEWAY, "fhir_error", Some(msg.clone())),
            AppError::UnsupportedEvent(msg) => (
                StatusCode::NOT_IMPLEMENTED,
                "unsupported_event",
                Some(msg.clone()),
            ),
            AppError::MalformedPayload(msg) => (
                StatusCode::BAD_REQUEST,
                "malformed_payload",
                Some(msg.clone()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
