//! HTTP API tests against an in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use domain::MSG_AWAITING_APPROVAL;
use onboarding_service_lib::api::{create_router, AppState};
use onboarding_service_lib::config::OnboardingServiceConfig;
use onboarding_service_lib::repository::{DocumentStore, MemoryDocumentStore};
use onboarding_service_lib::build_service;

fn app() -> Router {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let onboarding = build_service(store.clone(), &OnboardingServiceConfig::default());
    create_router(AppState::new(onboarding, store))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_decide_without_uid_returns_error_decision() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/onboarding/decide",
        Some(json!({ "email": "nobody@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "error");
    assert_eq!(body["message"], "Missing identity data");
}

#[tokio::test]
async fn test_onboarding_flow_over_http() {
    let app = app();
    let identity = json!({ "uid": "ada", "email": "ada@example.com", "displayName": "Ada" });

    let (status, body) = send(&app, Method::POST, "/onboarding/decide", Some(identity.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "action": "redirect", "destination": "welcome" }));

    let (status, body) = send(&app, Method::GET, "/onboarding/ada", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onboardingStatus"], "pending_profile");
    assert_eq!(body["displayName"], "Ada");
    assert_eq!(body["designation"], Value::Null);

    let (status, _) = send(
        &app,
        Method::POST,
        "/onboarding/ada/welcome",
        Some(json!({ "designation": "engineer", "extraFields": { "team": "compilers", "uid": "mallory" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::POST, "/onboarding/decide", Some(identity.clone())).await;
    assert_eq!(body, json!({ "action": "error", "message": MSG_AWAITING_APPROVAL }));

    let (status, _) = send(&app, Method::POST, "/onboarding/ada/approve", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::POST, "/onboarding/decide", Some(identity)).await;
    assert_eq!(body, json!({ "action": "redirect", "destination": "dashboard" }));

    let (_, body) = send(&app, Method::GET, "/onboarding/ada", None).await;
    assert_eq!(body["uid"], "ada");
    assert_eq!(body["onboardingStatus"], "active");
    assert_eq!(body["designation"], "engineer");
    assert_eq!(body["extraFields"], json!({ "team": "compilers" }));
}

#[tokio::test]
async fn test_welcome_requires_designation() {
    let app = app();
    send(&app, Method::POST, "/onboarding/decide", Some(json!({ "uid": "bob" }))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/onboarding/bob/welcome",
        Some(json!({ "designation": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Designation is required");
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/onboarding/ghost/approve", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::GET, "/onboarding/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_welcome_submission_conflicts() {
    let app = app();
    send(&app, Method::POST, "/onboarding/decide", Some(json!({ "uid": "eve" }))).await;
    send(
        &app,
        Method::POST,
        "/onboarding/eve/welcome",
        Some(json!({ "designation": "analyst" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/onboarding/eve/welcome",
        Some(json!({ "designation": "intern" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_openapi_document_lists_onboarding_paths() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/onboarding/decide"].is_object());
    assert!(body["paths"]["/onboarding/{uid}/approve"].is_object());
}
