// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava webhook event payload.

use serde::Deserialize;
use std::collections::HashMap;

/// Push event delivered to the webhook endpoint.
///
/// Parsed once per POST and discarded after dispatch.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// "create", "update" or "delete"
    pub aspect_type: String,
    #[serde(default)]
    pub event_time: i64,
    /// Activity ID for activity events, athlete ID for athlete events
    pub object_id: i64,
    /// "activity" or "athlete"
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub owner_id: i64,
    #[serde(default)]
    pub subscription_id: i64,
    /// For update events, the changed fields
    #[serde(default)]
    pub updates: Option<HashMap<String, serde_json::Value>>,
}
