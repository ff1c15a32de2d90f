//! Onboarding Service Library
//!
//! Routes freshly authenticated users to the welcome flow, the dashboard or
//! the admin console, and advances their onboarding status. Exposed over HTTP
//! or driven directly from the CLI.

pub mod api;
pub mod config;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::{AppResult, StoreBackend};

use crate::api::{create_router, AppState};
use crate::config::OnboardingServiceConfig;
use crate::repository::{DocumentStore, MemoryDocumentStore, ProfileStore, RedisDocumentStore};
use crate::service::{OnboardingManager, OnboardingService};

/// Connect the configured document store backend.
pub async fn connect_store(config: &OnboardingServiceConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store; profiles are lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
        StoreBackend::Redis => Arc::new(RedisDocumentStore::connect(&config.store.url).await?),
    };
    Ok(store)
}

/// Build the onboarding service on top of a document store.
pub fn build_service(
    store: Arc<dyn DocumentStore>,
    config: &OnboardingServiceConfig,
) -> Arc<dyn OnboardingService> {
    let profiles = Arc::new(ProfileStore::with_collection(
        store,
        config.store.collection.clone(),
    ));
    Arc::new(OnboardingManager::new(profiles))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: OnboardingServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect_store(&config).await?;
    let onboarding = build_service(store.clone(), &config);

    let state = AppState::new(onboarding, store);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    info!(
        service = %config.service.service_name,
        collection = %config.store.collection,
        "Onboarding service listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Approve a user directly against the store (for CLI commands).
pub async fn run_approve(
    config: OnboardingServiceConfig,
    uid: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect_store(&config).await?;
    let onboarding = build_service(store, &config);

    onboarding.approve_user(uid).await?;
    info!("Approved {}", uid);

    Ok(())
}
