//! Shared configuration structures.

use serde::{Deserialize, Serialize};

use domain::DEFAULT_PROFILE_COLLECTION;

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "onboarding-service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which document store backs the profile records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map, lost on restart
    Memory,
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Profile document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileStoreConfig {
    pub backend: StoreBackend,
    /// Redis URL, ignored by the memory backend
    pub url: String,
    /// Collection the profile records live in
    pub collection: String,
}

impl Default for ProfileStoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: "redis://127.0.0.1:6379".to_string(),
            collection: DEFAULT_PROFILE_COLLECTION.to_string(),
        }
    }
}
