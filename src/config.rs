//! Application configuration loaded from environment variables.
//!
//! All keys are read once at startup into an explicit struct that is passed
//! into each component; nothing reads ambient environment state afterwards.
//! Keys are loaded leniently (empty string when unset) because only some
//! operations need them: a deployment without FHIR delivery credentials must
//! still answer subscription verification. Each component validates the
//! values it depends on before making any network call.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret compared against `hub.verify_token` during subscription verification
    pub webhook_verify_token: String,
    /// FHIR repository base URL (Observation create target)
    pub fhir_repository_url: String,
    /// Azure AD authority URL, e.g. `https://login.microsoftonline.com/<tenant>`
    pub aad_tenant: String,
    /// Azure AD application (client) id
    pub aad_client_id: String,
    /// Azure AD client secret
    pub aad_client_secret: String,
    /// Resource identifier the AAD token is scoped to (the FHIR service)
    pub fhir_resource: String,
    /// Strava API base URL
    pub strava_base_url: String,
    /// Activity endpoint template with an `{id}` placeholder
    pub strava_activity_endpoint: String,
    /// Static Strava access token
    pub strava_access_token: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            webhook_verify_token: "test_verify_token".to_string(),
            fhir_repository_url: "http://localhost:8080/fhir".to_string(),
            aad_tenant: "https://login.microsoftonline.com/test-tenant".to_string(),
            aad_client_id: "test_client_id".to_string(),
            aad_client_secret: "test_client_secret".to_string(),
            fhir_resource: "https://fhir.example.org".to_string(),
            strava_base_url: "https://www.strava.com/api/v3".to_string(),
            strava_activity_endpoint: "/activities/{id}".to_string(),
            strava_access_token: "test_access_token".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Secrets can be set via a local `.env` file during development; in
    /// production the hosting platform injects them as environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            webhook_verify_token: trimmed_var("WEBHOOK_VERIFY_TOKEN"),
            fhir_repository_url: trimmed_var("FHIR_REPOSITORY_URL"),
            aad_tenant: trimmed_var("AAD_TENANT"),
            aad_client_id: trimmed_var("AAD_CLIENT_ID"),
            aad_client_secret: trimmed_var("AAD_CLIENT_SECRET"),
            fhir_resource: trimmed_var("FHIR_RESOURCE"),
            strava_base_url: trimmed_var("STRAVA_BASE_URL"),
            strava_activity_endpoint: env::var("STRAVA_ACTIVITY_ENDPOINT")
                .unwrap_or_else(|_| "/activities/{id}".to_string()),
            strava_access_token: trimmed_var("STRAVA_ACCESS_TOKEN"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }
}

/// Read an environment variable, trimming whitespace; empty when unset.
fn trimmed_var(key: &str) -> String {
    env::var(key)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}
