// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-to-FHIR bridge
//!
//! This crate receives Strava webhook events, fetches the full activity,
//! converts it into a FHIR exercise-duration Observation and creates it in a
//! FHIR repository under an Azure AD client-credentials session.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::ActivityForwarder;

/// Shared application state.
///
/// Read-only after startup; request handlers share it through an `Arc`.
pub struct AppState {
    pub config: Config,
    pub forwarder: ActivityForwarder,
}
