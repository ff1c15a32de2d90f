//! Onboarding service configuration.

use std::env;

use common::{ProfileStoreConfig, ServiceConfig, StoreBackend};

/// Onboarding service configuration.
#[derive(Debug, Clone, Default)]
pub struct OnboardingServiceConfig {
    pub service: ServiceConfig,
    pub store: ProfileStoreConfig,
}

impl OnboardingServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = match env::var("PROFILE_STORE_BACKEND") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, using {:?}", e, defaults.store.backend);
                defaults.store.backend
            }),
            Err(_) => defaults.store.backend,
        };

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("ONBOARDING_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: env::var("ONBOARDING_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.service.port),
            },
            store: ProfileStoreConfig {
                backend,
                url: env::var("PROFILE_STORE_REDIS_URL")
                    .or_else(|_| env::var("REDIS_URL"))
                    .unwrap_or(defaults.store.url),
                collection: env::var("PROFILE_COLLECTION").unwrap_or(defaults.store.collection),
            },
        }
    }

    /// Apply a collection override, ignoring blank values.
    pub fn with_collection(mut self, collection: Option<String>) -> Self {
        if let Some(collection) = collection.filter(|c| !c.trim().is_empty()) {
            self.store.collection = collection;
        }
        self
    }

    pub fn with_backend(mut self, backend: Option<StoreBackend>) -> Self {
        if let Some(backend) = backend {
            self.store.backend = backend;
        }
        self
    }
}
