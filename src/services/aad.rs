// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Azure AD token acquisition via the client-credentials grant.

use crate::config::Config;
use crate::error::{AppError, Result};
use serde::Deserialize;

/// Client-credentials token client for the AAD v1 token endpoint.
#[derive(Clone)]
pub struct AadTokenClient {
    http: reqwest::Client,
    /// Authority URL, e.g. `https://login.microsoftonline.com/<tenant>`
    tenant: String,
    client_id: String,
    client_secret: String,
    /// Resource the token is scoped to (the FHIR service)
    resource: String,
}

/// Token endpoint response (subset).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl AadTokenClient {
    /// Create a new token client over a shared HTTP connection pool.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            tenant: config.aad_tenant.clone(),
            client_id: config.aad_client_id.clone(),
            client_secret: config.aad_client_secret.clone(),
            resource: config.fhir_resource.clone(),
        }
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// No retry at this layer; the caller decides whether to repeat the whole
    /// operation.
    pub async fn acquire_token(&self) -> Result<String> {
        if self.tenant.is_empty() {
            return Err(AppError::Configuration("AAD_TENANT"));
        }
        if self.client_id.is_empty() {
            return Err(AppError::Configuration("AAD_CLIENT_ID"));
        }
        if self.client_secret.is_empty() {
            return Err(AppError::Configuration("AAD_CLIENT_SECRET"));
        }
        if self.resource.is_empty() {
            return Err(AppError::Configuration("FHIR_RESOURCE"));
        }

        let url = format!("{}/oauth2/token", self.tenant.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("resource", self.resource.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Authentication(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Authentication(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::Authentication(format!("Failed to parse token response: {}", e))
        })?;

        Ok(token.access_token)
    }
}
