// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end pipeline tests against in-process stub servers.
//!
//! One axum stub stands in for all three collaborators (Strava API, Azure AD
//! token endpoint, FHIR repository) and records what it saw, so the tests can
//! assert both the happy path and which calls a failure mode suppresses.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use strava_fhir_bridge::config::Config;
use strava_fhir_bridge::error::AppError;
use strava_fhir_bridge::services::{AadTokenClient, ActivityForwarder, FhirClient, StravaClient};

/// Everything the stub server observed.
#[derive(Default)]
struct StubState {
    strava_ids: Mutex<Vec<i64>>,
    token_calls: AtomicUsize,
    token_forms: Mutex<Vec<HashMap<String, String>>>,
    fhir_calls: AtomicUsize,
    fhir_bodies: Mutex<Vec<serde_json::Value>>,
    fhir_auth: Mutex<Vec<String>>,
}

async fn strava_activity(
    State(stub): State<Arc<StubState>>,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    stub.strava_ids.lock().unwrap().push(id);
    Json(json!({
        "id": id,
        "athlete": {"id": 134815},
        "name": "Morning Run",
        "distance": 10000.0,
        "moving_time": 3500,
        "elapsed_time": 3600,
        "type": "Run",
        "start_date": "2024-03-01T07:00:00Z",
        "start_date_local": "2024-03-01T09:00:00Z",
        "timezone": "(GMT+02:00) Europe/Helsinki"
    }))
}

async fn token(
    State(stub): State<Arc<StubState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    stub.token_calls.fetch_add(1, Ordering::SeqCst);
    stub.token_forms.lock().unwrap().push(form);
    Json(json!({
        "token_type": "Bearer",
        "expires_in": "3599",
        "access_token": "stub-aad-token"
    }))
}

async fn rejecting_token() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "invalid_client"})),
    )
}

async fn fhir_create(
    State(stub): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(mut body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    stub.fhir_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(auth) = headers.get("authorization") {
        stub.fhir_auth
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap_or_default().to_string());
    }
    stub.fhir_bodies.lock().unwrap().push(body.clone());

    // Return-representation semantics: echo with a server-assigned id
    body["id"] = json!("obs-1");
    (StatusCode::CREATED, Json(body))
}

async fn failing_fhir_create() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"resourceType": "OperationOutcome"})),
    )
}

/// Spawn the stub server; returns its base URL and observation log.
async fn spawn_stub() -> (String, Arc<StubState>) {
    let stub = Arc::new(StubState::default());
    let router = Router::new()
        .route("/activities/{id}", get(strava_activity))
        .route("/tenant/oauth2/token", post(token))
        .route("/bad-tenant/oauth2/token", post(rejecting_token))
        .route("/fhir/Observation", post(fhir_create))
        .route("/bad-fhir/Observation", post(failing_fhir_create))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

/// Config pointing every collaborator at the stub.
fn stub_config(base: &str) -> Config {
    Config {
        webhook_verify_token: "test_verify_token".to_string(),
        fhir_repository_url: format!("{}/fhir", base),
        aad_tenant: format!("{}/tenant", base),
        aad_client_id: "test_client_id".to_string(),
        aad_client_secret: "test_client_secret".to_string(),
        fhir_resource: "https://fhir.example.org".to_string(),
        strava_base_url: base.to_string(),
        strava_activity_endpoint: "/activities/{id}".to_string(),
        strava_access_token: "stub-strava-token".to_string(),
        port: 0,
    }
}

fn forwarder(config: &Config) -> ActivityForwarder {
    let http = reqwest::Client::new();
    ActivityForwarder::new(
        StravaClient::new(http.clone(), config),
        AadTokenClient::new(http.clone(), config),
        FhirClient::new(http, config),
    )
}

#[tokio::test]
async fn test_forward_creates_observation() {
    let (base, stub) = spawn_stub().await;
    let config = stub_config(&base);

    let created = forwarder(&config).forward(42).await.expect("forward");

    // Server representation comes back, id assigned
    assert_eq!(created.id.as_deref(), Some("obs-1"));
    assert_eq!(created.value_quantity.as_ref().unwrap().value, 60);

    // Fetcher asked for exactly the event's object id
    assert_eq!(*stub.strava_ids.lock().unwrap(), vec![42]);

    // Token exchange used the client-credentials grant
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 1);
    let forms = stub.token_forms.lock().unwrap();
    assert_eq!(
        forms[0].get("grant_type").map(String::as_str),
        Some("client_credentials")
    );
    assert_eq!(
        forms[0].get("resource").map(String::as_str),
        Some("https://fhir.example.org")
    );

    // The repository saw the bearer token and the converted Observation
    assert_eq!(
        *stub.fhir_auth.lock().unwrap(),
        vec!["Bearer stub-aad-token".to_string()]
    );
    let bodies = stub.fhir_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["resourceType"], "Observation");
    assert_eq!(bodies[0]["valueQuantity"]["value"], 60);
    assert_eq!(bodies[0]["subject"]["reference"], "Patient/134815");
    assert_eq!(
        bodies[0]["identifier"][0]["value"],
        "urn:uuid:6288f477-90ef-424a-b6e3-da4ff18a058e"
    );
    assert_eq!(bodies[0]["code"]["coding"][0]["code"], "55411-3");
}

#[tokio::test]
async fn test_missing_repository_url_fails_before_delivery_calls() {
    let (base, stub) = spawn_stub().await;
    let config = Config {
        fhir_repository_url: String::new(),
        ..stub_config(&base)
    };

    let result = forwarder(&config).forward(42).await;

    match result {
        Err(AppError::Configuration(key)) => assert_eq!(key, "FHIR_REPOSITORY_URL"),
        other => panic!("expected configuration error, got {:?}", other),
    }

    // The fetch had already happened, but no delivery-side call was made
    assert_eq!(stub.strava_ids.lock().unwrap().len(), 1);
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.fhir_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_strava_failure_is_upstream_fetch_error() {
    let (base, stub) = spawn_stub().await;
    let config = Config {
        strava_activity_endpoint: "/missing/{id}".to_string(),
        ..stub_config(&base)
    };

    let result = forwarder(&config).forward(42).await;

    assert!(matches!(result, Err(AppError::UpstreamFetch(_))));
    // Terminal for this event: nothing downstream runs
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.fhir_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_token_rejection_is_authentication_error() {
    let (base, stub) = spawn_stub().await;
    let config = Config {
        aad_tenant: format!("{}/bad-tenant", base),
        ..stub_config(&base)
    };

    let result = forwarder(&config).forward(42).await;

    assert!(matches!(result, Err(AppError::Authentication(_))));
    assert_eq!(stub.fhir_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_repository_failure_is_delivery_error() {
    let (base, _stub) = spawn_stub().await;
    let config = Config {
        fhir_repository_url: format!("{}/bad-fhir", base),
        ..stub_config(&base)
    };

    let result = forwarder(&config).forward(42).await;

    assert!(matches!(result, Err(AppError::Delivery(_))));
}

// ─── Dispatcher-level tests over the same stubs ──────────────────────────────

use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

use strava_fhir_bridge::routes::create_router;
use strava_fhir_bridge::AppState;

fn create_app(config: Config) -> axum::Router {
    let fwd = forwarder(&config);
    let state = Arc::new(AppState {
        config,
        forwarder: fwd,
    });
    create_router(state)
}

async fn post_event(app: axum::Router, event: serde_json::Value) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&event).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_event_delivers_end_to_end() {
    let (base, stub) = spawn_stub().await;
    let app = create_app(stub_config(&base));

    let event = json!({
        "aspect_type": "create",
        "event_time": 1549560669,
        "object_id": 42,
        "object_type": "activity",
        "owner_id": 134815,
        "subscription_id": 120475
    });

    let response = post_event(app, event).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*stub.strava_ids.lock().unwrap(), vec![42]);
    assert_eq!(stub.fhir_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_update_event_makes_no_outbound_calls() {
    let (base, stub) = spawn_stub().await;
    let app = create_app(stub_config(&base));

    let event = json!({
        "aspect_type": "update",
        "object_id": 42,
        "object_type": "activity",
        "owner_id": 134815,
        "updates": {"title": "Renamed"}
    });

    let response = post_event(app, event).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(stub.strava_ids.lock().unwrap().is_empty());
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.fhir_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_event_makes_no_outbound_calls() {
    let (base, stub) = spawn_stub().await;
    let app = create_app(stub_config(&base));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from("{\"aspect_type\": \"create\""))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(stub.strava_ids.lock().unwrap().is_empty());
    assert_eq!(stub.fhir_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transient_delivery_failure_is_still_acknowledged() {
    let (base, stub) = spawn_stub().await;
    let app = create_app(Config {
        fhir_repository_url: format!("{}/bad-fhir", base),
        ..stub_config(&base)
    });

    let event = json!({
        "aspect_type": "create",
        "object_id": 42,
        "object_type": "activity",
        "owner_id": 134815
    });

    let response = post_event(app, event).await;

    // Best-effort delivery: the tracking service only needs receipt
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.strava_ids.lock().unwrap().len(), 1);
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 1);
}
