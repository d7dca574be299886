// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aad;
pub mod convert;
pub mod fhir;
pub mod forwarder;
pub mod strava;

pub use aad::AadTokenClient;
pub use fhir::FhirClient;
pub use forwarder::ActivityForwarder;
pub use strava::StravaClient;
