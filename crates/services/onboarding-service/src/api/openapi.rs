//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::onboarding_handler::WelcomeStepRequest;
use domain::{Decision, Destination, Identity, ProfileResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::onboarding_handler::decide,
        crate::api::handlers::onboarding_handler::complete_welcome_step,
        crate::api::handlers::onboarding_handler::approve_user,
        crate::api::handlers::onboarding_handler::get_profile,
    ),
    components(
        schemas(
            Identity,
            Decision,
            Destination,
            ProfileResponse,
            WelcomeStepRequest,
        )
    ),
    tags(
        (name = "Onboarding", description = "Post-login routing and onboarding steps"),
    )
)]
pub struct ApiDoc;
