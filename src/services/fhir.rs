// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FHIR repository client for creating Observation resources.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Observation;

/// Client for the target FHIR repository.
#[derive(Clone)]
pub struct FhirClient {
    http: reqwest::Client,
    repository_url: String,
}

impl FhirClient {
    /// Create a new repository client over a shared HTTP connection pool.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            repository_url: config.fhir_repository_url.clone(),
        }
    }

    /// Fail with a configuration error unless a repository URL is set.
    pub fn ensure_configured(&self) -> Result<()> {
        if self.repository_url.is_empty() {
            return Err(AppError::Configuration("FHIR_REPOSITORY_URL"));
        }
        Ok(())
    }

    /// Create an Observation and return the server's representation.
    ///
    /// The server may assign identifiers, so the returned resource can differ
    /// from the submitted one. Single attempt; duplicate protection on
    /// redelivery rests on the fixed identifiers inside the Observation.
    pub async fn create_observation(
        &self,
        observation: &Observation,
        access_token: &str,
    ) -> Result<Observation> {
        self.ensure_configured()?;

        let url = format!("{}/Observation", self.repository_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .header("Prefer", "return=representation")
            .json(observation)
            .send()
            .await
            .map_err(|e| AppError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Delivery(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Delivery(format!("JSON parse error: {}", e)))
    }
}
