// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching activities.
//!
//! Authenticates with the static access token from configuration. Token
//! refresh is not implemented (known limitation carried from the original
//! deployment); an expired token surfaces as an upstream fetch error.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Activity;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    activity_endpoint: String,
    access_token: String,
}

impl StravaClient {
    /// Create a new Strava client over a shared HTTP connection pool.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.strava_base_url.clone(),
            activity_endpoint: config.strava_activity_endpoint.clone(),
            access_token: config.strava_access_token.clone(),
        }
    }

    /// Get a detailed activity by ID.
    ///
    /// Single attempt, no backoff; a failed fetch is terminal for the event
    /// that requested it.
    pub async fn get_activity(&self, activity_id: i64) -> Result<Activity> {
        if self.base_url.is_empty() {
            return Err(AppError::Configuration("STRAVA_BASE_URL"));
        }
        if self.activity_endpoint.is_empty() {
            return Err(AppError::Configuration("STRAVA_ACTIVITY_ENDPOINT"));
        }
        if self.access_token.is_empty() {
            return Err(AppError::Configuration("STRAVA_ACCESS_TOKEN"));
        }

        let url = self.activity_url(activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamFetch(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("JSON parse error: {}", e)))
    }

    /// Expand the endpoint template for an activity id.
    fn activity_url(&self, activity_id: i64) -> String {
        let path = self
            .activity_endpoint
            .replace("{id}", &activity_id.to_string());
        format!("{}{}", self.base_url, path)
    }
}
