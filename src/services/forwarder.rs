// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity forwarding pipeline.
//!
//! Core workflow:
//! 1. Fetch the activity from Strava
//! 2. Convert it to an exercise-duration Observation
//! 3. Acquire an Azure AD bearer token
//! 4. Create the Observation in the FHIR repository

use crate::error::Result;
use crate::models::Observation;
use crate::services::{convert, AadTokenClient, FhirClient, StravaClient};

/// Fetches activities and forwards them to the FHIR repository.
#[derive(Clone)]
pub struct ActivityForwarder {
    strava: StravaClient,
    aad: AadTokenClient,
    fhir: FhirClient,
}

impl ActivityForwarder {
    pub fn new(strava: StravaClient, aad: AadTokenClient, fhir: FhirClient) -> Self {
        Self { strava, aad, fhir }
    }

    /// Forward a single activity by ID.
    ///
    /// Returns the repository's representation of the created Observation,
    /// which may carry server-assigned identifiers. Strictly sequential; each
    /// stage runs to completion before the next starts and any failure is
    /// terminal for this event.
    pub async fn forward(&self, activity_id: i64) -> Result<Observation> {
        tracing::info!(activity_id, "Forwarding activity");

        // 1. Fetch the activity
        let activity = self.strava.get_activity(activity_id).await?;
        tracing::debug!(
            activity_id,
            elapsed_time = activity.elapsed_time,
            "Activity fetched"
        );

        // Check the delivery target before spending a token round trip
        self.fhir.ensure_configured()?;

        // 2. Convert
        let observation = convert::activity_to_observation(&activity);

        // 3. Acquire a bearer token for the repository
        let access_token = self.aad.acquire_token().await?;

        // 4. Create in repository
        let created = self
            .fhir
            .create_observation(&observation, &access_token)
            .await?;

        tracing::info!(activity_id, "Observation created in FHIR repository");
        Ok(created)
    }
}
