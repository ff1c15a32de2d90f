//! Request handlers.

pub mod health_handler;
pub mod onboarding_handler;

pub use health_handler::health_routes;
pub use onboarding_handler::onboarding_routes;
