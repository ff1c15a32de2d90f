//! Application state for dependency injection.

use std::sync::Arc;

use crate::repository::DocumentStore;
use crate::service::OnboardingService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub onboarding: Arc<dyn OnboardingService>,
    /// Backing store, used for health checks
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create new app state.
    pub fn new(onboarding: Arc<dyn OnboardingService>, store: Arc<dyn DocumentStore>) -> Self {
        Self { onboarding, store }
    }
}
