// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava detailed-activity model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Owning athlete, as embedded in an activity response.
#[derive(Debug, Clone, Deserialize)]
pub struct Athlete {
    pub id: i64,
    #[serde(default)]
    pub resource_state: i64,
}

/// Route map metadata attached to an activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Map {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub polyline: Option<String>,
    #[serde(default)]
    pub summary_polyline: Option<String>,
}

/// Detailed activity as returned by `GET /activities/{id}`.
///
/// Only `id`, `athlete`, `start_date_local` and `elapsed_time` feed the
/// Observation mapping; the rest is carried so a complete API response
/// deserializes without loss. Everything except the id and the start
/// timestamps tolerates absence, since Strava omits fields depending on the
/// activity kind (manual entries have no map, trainer rides no latlng).
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(default)]
    pub resource_state: i64,
    #[serde(default)]
    pub athlete: Option<Athlete>,
    #[serde(default)]
    pub name: String,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: i64,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: i64,
    #[serde(default)]
    pub total_elevation_gain: f64,
    /// Sport type (Ride, Run, Hike, etc.)
    #[serde(default, rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub workout_type: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub upload_id_str: Option<String>,
    /// Start time in UTC
    pub start_date: DateTime<Utc>,
    /// Start time in the activity's local timezone (Z-suffixed on the wire)
    pub start_date_local: DateTime<Utc>,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub utc_offset: f64,
    #[serde(default)]
    pub start_latlng: Vec<f64>,
    #[serde(default)]
    pub end_latlng: Vec<f64>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_state: Option<String>,
    #[serde(default)]
    pub location_country: Option<String>,
    #[serde(default)]
    pub achievement_count: i64,
    #[serde(default)]
    pub kudos_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub athlete_count: i64,
    #[serde(default)]
    pub photo_count: i64,
    #[serde(default)]
    pub map: Option<Map>,
    #[serde(default)]
    pub trainer: bool,
    #[serde(default)]
    pub commute: bool,
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub gear_id: Option<String>,
    /// Average speed in meters per second
    #[serde(default)]
    pub average_speed: f64,
    #[serde(default)]
    pub max_speed: f64,
    #[serde(default)]
    pub device_watts: bool,
    #[serde(default)]
    pub has_heartrate: bool,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    #[serde(default)]
    pub max_heartrate: Option<f64>,
    #[serde(default)]
    pub heartrate_opt_out: bool,
    #[serde(default)]
    pub display_hide_heartrate_option: bool,
    #[serde(default)]
    pub elev_high: f64,
    #[serde(default)]
    pub elev_low: f64,
    #[serde(default)]
    pub pr_count: i64,
    #[serde(default)]
    pub total_photo_count: i64,
    #[serde(default)]
    pub has_kudoed: bool,
    #[serde(default)]
    pub calories: f64,
}
