//! Service layer - onboarding use cases.

mod onboarding_service;

pub use onboarding_service::{OnboardingManager, OnboardingService};
