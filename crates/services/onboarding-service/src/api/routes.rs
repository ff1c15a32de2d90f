//! Route configuration.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::api::handlers::{health_routes, onboarding_routes};
use crate::api::openapi::ApiDoc;
use crate::api::state::AppState;

/// Create the main router with all routes.
///
/// No authentication is applied; callers are trusted.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/onboarding", onboarding_routes())
        .with_state(state)
}
