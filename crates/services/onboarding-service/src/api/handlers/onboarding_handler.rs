//! Onboarding handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Decision, Document, Identity, ProfileResponse};

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;

/// Welcome step submission with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeStepRequest {
    /// Role or category label chosen by the user
    #[validate(length(min = 1, message = "Designation is required"))]
    #[schema(example = "engineer")]
    pub designation: String,
    /// Supplemental profile fields. `uid`, `isAdmin`, `onboardingStatus`,
    /// `designation` and timestamps are ignored, as are non-string `email`
    /// and `displayName` values.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub extra_fields: Option<Document>,
}

/// Create onboarding routes
pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/decide", post(decide))
        .route("/:uid", get(get_profile))
        .route("/:uid/welcome", post(complete_welcome_step))
        .route("/:uid/approve", post(approve_user))
}

/// Route an authenticated identity
#[utoipa::path(
    post,
    path = "/onboarding/decide",
    tag = "Onboarding",
    request_body = Identity,
    responses(
        (status = 200, description = "Routing decision (redirect or error message)", body = Decision),
        (status = 400, description = "Malformed identity payload"),
        (status = 503, description = "Profile store unavailable")
    )
)]
pub async fn decide(
    State(state): State<AppState>,
    payload: Result<Json<Identity>, JsonRejection>,
) -> AppResult<Json<Decision>> {
    let Json(identity) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let decision = state.onboarding.decide(&identity).await?;
    Ok(Json(decision))
}

/// Submit the welcome step
#[utoipa::path(
    post,
    path = "/onboarding/{uid}/welcome",
    tag = "Onboarding",
    params(
        ("uid" = String, Path, description = "User id")
    ),
    request_body = WelcomeStepRequest,
    responses(
        (status = 204, description = "Profile submitted for admin approval"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Profile not found"),
        (status = 409, description = "Welcome step already completed")
    )
)]
pub async fn complete_welcome_step(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    ValidatedJson(payload): ValidatedJson<WelcomeStepRequest>,
) -> AppResult<StatusCode> {
    state
        .onboarding
        .complete_welcome_step(
            &uid,
            &payload.designation,
            payload.extra_fields.unwrap_or_default(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Approve a user (administrative caller)
#[utoipa::path(
    post,
    path = "/onboarding/{uid}/approve",
    tag = "Onboarding",
    params(
        ("uid" = String, Path, description = "User id to approve")
    ),
    responses(
        (status = 204, description = "User is active"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn approve_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<StatusCode> {
    state.onboarding.approve_user(&uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get profile by uid
#[utoipa::path(
    get,
    path = "/onboarding/{uid}",
    tag = "Onboarding",
    params(
        ("uid" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Profile record", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.onboarding.get_profile(&uid).await?;
    Ok(Json(ProfileResponse::from(profile)))
}
