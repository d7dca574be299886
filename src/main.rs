// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-to-FHIR bridge server
//!
//! Bridges Strava activity webhooks to a FHIR clinical repository: new
//! activities are fetched, converted to exercise-duration Observations and
//! created in the configured repository.

use std::sync::Arc;
use strava_fhir_bridge::{
    config::Config,
    services::{AadTokenClient, ActivityForwarder, FhirClient, StravaClient},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bound on every outbound round trip (Strava, AAD, FHIR repository).
const OUTBOUND_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(port = config.port, "Starting Strava-to-FHIR bridge");

    // One pooled HTTP client with a bounded per-request timeout, shared by
    // all outbound calls. Timeout expiry surfaces as the calling stage's
    // fetch/authentication/delivery error.
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(OUTBOUND_TIMEOUT_SECS))
        .build()?;

    let forwarder = ActivityForwarder::new(
        StravaClient::new(http.clone(), &config),
        AadTokenClient::new(http.clone(), &config),
        FhirClient::new(http, &config),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        forwarder,
    });

    // Build router
    let app = strava_fhir_bridge::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strava_fhir_bridge=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
