//! Onboarding Service - post-login routing and onboarding state.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::StoreBackend;
use onboarding_service_lib::config::OnboardingServiceConfig;

#[derive(Parser)]
#[command(name = "onboarding-service")]
#[command(about = "User onboarding and post-login routing service")]
struct Cli {
    /// Profile collection name (overrides PROFILE_COLLECTION)
    #[arg(long, global = true)]
    collection: Option<String>,

    /// Document store backend: memory or redis (overrides PROFILE_STORE_BACKEND)
    #[arg(long, global = true)]
    store: Option<StoreBackend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Approve a user waiting for admin review
    Approve {
        /// User id to approve
        uid: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = OnboardingServiceConfig::from_env()
        .with_collection(cli.collection)
        .with_backend(cli.store);

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            onboarding_service_lib::run_server(config).await?;
        }
        Commands::Approve { uid } => {
            onboarding_service_lib::run_approve(config, &uid).await?;
        }
    }

    Ok(())
}
