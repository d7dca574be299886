// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook routes for Strava events.
//!
//! The webhook delivery contract is confirmation of receipt, not of
//! downstream success: pipeline failures are logged and acknowledged with
//! 200 so Strava does not redeliver forever. The two exceptions are missing
//! configuration (500, the service cannot operate) and the unimplemented
//! delete aspect (501, which must stay operator-visible).

use crate::error::AppError;
use crate::models::Event;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/webhook",
        get(verify).post(handle_event).fallback(unknown_method),
    )
}

/// Any method other than GET/POST is a bad request.
async fn unknown_method() -> StatusCode {
    tracing::info!("Unknown webhook operation");
    StatusCode::BAD_REQUEST
}

/// Strava webhook verification query params.
///
/// A request missing either parameter fails the Query extractor and is
/// rejected with 400 before the handler runs.
#[derive(Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.challenge")]
    challenge: String,
    #[serde(rename = "hub.verify_token")]
    verify_token: String,
}

/// Verification response.
#[derive(Serialize)]
struct VerifyResponse {
    #[serde(rename = "hub.challenge")]
    challenge: String,
}

/// Verify webhook subscription (GET).
async fn verify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> Response {
    tracing::info!(
        challenge = %params.challenge,
        "Incoming subscription validation request"
    );

    if state.config.webhook_verify_token.is_empty() {
        // Without a configured secret nothing can ever verify
        return AppError::Configuration("WEBHOOK_VERIFY_TOKEN").into_response();
    }

    if params.verify_token != state.config.webhook_verify_token {
        tracing::warn!("Webhook verification failed: invalid token");
        return StatusCode::BAD_REQUEST.into_response();
    }

    tracing::info!("Webhook subscription verified");
    Json(VerifyResponse {
        challenge: params.challenge,
    })
    .into_response()
}

/// Handle incoming webhook events (POST).
///
/// The body is taken raw and parsed by hand: a permanently malformed payload
/// would be redelivered identically on every retry, so it is acknowledged
/// rather than rejected.
async fn handle_event(State(state): State<Arc<AppState>>, body: String) -> Response {
    tracing::info!(payload = %body, "Webhook event received (raw)");

    let event: Event = match serde_json::from_str(&body) {
        Ok(e) => e,
        Err(e) => {
            let err = AppError::MalformedPayload(e.to_string());
            tracing::error!(error = %err, "Failed to parse webhook event");
            return ok_response();
        }
    };

    tracing::info!(
        object_type = %event.object_type,
        object_id = event.object_id,
        aspect_type = %event.aspect_type,
        owner_id = event.owner_id,
        "Webhook event parsed"
    );

    match event.aspect_type.as_str() {
        "create" => match state.forwarder.forward(event.object_id).await {
            Ok(observation) => {
                if let Ok(resource) = serde_json::to_string_pretty(&observation) {
                    tracing::info!(
                        activity_id = event.object_id,
                        resource = %resource,
                        "Data successfully sent to FHIR repository"
                    );
                }
                ok_response()
            }
            Err(err @ AppError::Configuration(_)) => {
                tracing::error!(error = %err, "Service is not configured for delivery");
                err.into_response()
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    activity_id = event.object_id,
                    "Failed to forward activity"
                );
                ok_response()
            }
        },
        "update" => {
            tracing::debug!(activity_id = event.object_id, "Ignoring activity update");
            ok_response()
        }
        "delete" => {
            tracing::error!(
                activity_id = event.object_id,
                "Activity deletion is not implemented"
            );
            AppError::UnsupportedEvent("activity delete".to_string()).into_response()
        }
        other => {
            tracing::warn!(aspect_type = %other, "Ignoring unknown aspect type");
            ok_response()
        }
    }
}

/// Acknowledgment body Strava expects.
fn ok_response() -> Response {
    (StatusCode::OK, "OK").into_response()
}
